use gc::{Finalize, Trace};
use std::collections::hash_map;
use std::fmt::{Debug, Error as FmtError, Formatter};

use super::gc::{shared, GcShared};
use crate::helpers::ImmutableString;
use std::collections::HashMap;

/// One frame of bindings, linked to the frame it was created in
pub struct Environment<V: Trace + 'static> {
    pub(super) parent: Option<GcShared<Environment<V>>>,
    pub(super) bindings: HashMap<ImmutableString, V>,
}

impl<V: Trace> Default for Environment<V> {
    fn default() -> Environment<V> {
        Environment {
            parent: None,
            bindings: HashMap::new(),
        }
    }
}

#[derive(Debug)]
struct FmtEnvironment<'a, V: Trace + Debug + 'static> {
    parent: Option<&'a GcShared<Environment<V>>>,
    bindings: hash_map::Keys<'a, ImmutableString, V>,
}

impl<V: Trace + Debug> Debug for Environment<V> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), FmtError> {
        FmtEnvironment {
            parent: self.parent.as_ref(),
            bindings: self.bindings.keys(),
        }
        .fmt(fmt)
    }
}

impl<V: Trace> Finalize for Environment<V> {}
unsafe impl<V: Trace> Trace for Environment<V> {
    custom_trace!(this, {
        if let Some(ref env) = this.parent {
            mark(env);
        }
        for v in this.bindings.values() {
            mark(v);
        }
    });
}

/// Allocates a fresh, empty frame whose parent is `parent`
pub fn child<V: Trace>(parent: &GcShared<Environment<V>>) -> GcShared<Environment<V>> {
    shared(Environment {
        parent: Some(parent.clone()),
        bindings: HashMap::new(),
    })
}

impl<V: Trace + Clone> Environment<V> {
    /// Rebinds `name` in the nearest frame that already binds it.
    /// Returns `false`, leaving every frame untouched, when no frame does.
    pub fn set(&mut self, name: &str, value: V) -> bool {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return true;
        }

        let mut env = match self.parent {
            Some(ref parent) => parent.clone(),
            None => return false,
        };

        loop {
            env = {
                let mut envref = env.borrow_mut();

                if let Some(slot) = envref.bindings.get_mut(name) {
                    *slot = value;
                    return true;
                }

                let parent = match envref.parent {
                    Some(ref parent) => parent.clone(),
                    None => return false,
                };
                parent
            }
        }
    }

    /// Binds `name` in this frame only, shadowing or replacing any previous binding
    pub fn define(&mut self, name: ImmutableString, value: V) {
        self.bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<V> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        let mut environment = match self.parent {
            Some(ref parent) => parent.clone(),
            None => return None,
        };
        loop {
            environment = {
                let borrowed = environment.borrow();
                if let Some(value) = borrowed.bindings.get(name) {
                    return Some(value.clone());
                }
                let parent = match borrowed.parent {
                    Some(ref parent) => parent.clone(),
                    None => return None,
                };
                parent
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of parent links between this frame and the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut environment = self.parent.clone();
        while let Some(env) = environment {
            depth += 1;
            environment = env.borrow().parent.clone();
        }
        depth
    }
}
