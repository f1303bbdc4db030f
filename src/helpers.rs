use std::rc::Rc;

/// Shared, immutable text used for symbol names and environment keys
pub type ImmutableString = Rc<str>;

//
// Macros
//
macro_rules! syntax_err {
    ($($arg:tt)*) => ({
        return Err($crate::error::Error::new(
            $crate::error::ErrorKind::Syntax,
            format!($($arg)*),
        ))
    })
}

macro_rules! name_err {
    ($($arg:tt)*) => ({
        return Err($crate::error::Error::new(
            $crate::error::ErrorKind::Name,
            format!($($arg)*),
        ))
    })
}

macro_rules! runtime_err {
    ($($arg:tt)*) => ({
        return Err($crate::error::Error::new(
            $crate::error::ErrorKind::Runtime,
            format!($($arg)*),
        ))
    })
}
