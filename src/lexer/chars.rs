#[derive(Debug)]
pub struct Chars {
    vec: Vec<char>,
    index: usize,
}

impl Iterator for Chars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let r = self.peek(0);
        if r.is_some() {
            self.index += 1;
        }
        r
    }
}

impl Chars {
    pub fn peek(&self, i: usize) -> Option<char> {
        self.vec.get(self.index + i).cloned()
    }

    pub fn pos(&self) -> usize {
        self.index
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek(0).map_or(false, char::is_whitespace) {
            self.index += 1;
        }
    }

    pub fn from_vec(v: Vec<char>) -> Chars {
        Chars { vec: v, index: 0 }
    }

    pub fn from_str(s: &str) -> Chars {
        Chars::from_vec(s.chars().collect())
    }
}
