//! Persistent environment: a chain of immutable frames with shared parents.
//! `bind` never touches the receiver, so a closure's captured `Env` is a
//! snapshot that later bindings in the defining scope cannot reach.

use std::rc::Rc;

use crate::runtime::value::Value;

#[derive(Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

struct Frame {
    name: String,
    value: Value,
    parent: Option<Rc<Frame>>,
}

impl Env {
    pub fn new() -> Self { Self::default() }

    pub fn bind(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            head: Some(Rc::new(Frame { name: name.into(), value, parent: self.head.clone() })),
        }
    }

    /// Innermost binding of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Number of frames, shadowed ones included.
    pub fn len(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |f| f.parent.as_deref())
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.frames().map(|fr| (&fr.name, fr.value.type_name()))).finish()
    }
}

// Long chains would otherwise drop recursively, one stack frame per binding.
impl Drop for Frame {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut frame) => next = frame.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(env: &Env, name: &str) -> Option<i64> {
        match env.get(name) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    #[test]
    fn bind_shadows_without_mutating() {
        let a = Env::new().bind("x", Value::Integer(1));
        let b = a.bind("x", Value::Integer(2));
        assert_eq!(int(&a, "x"), Some(1));
        assert_eq!(int(&b, "x"), Some(2));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn missing_name() {
        let env = Env::new().bind("x", Value::Integer(1));
        assert!(env.get("y").is_none());
        assert!(Env::new().is_empty());
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let mut env = Env::new();
        for i in 0..200_000 {
            env = env.bind("i", Value::Integer(i));
        }
        assert_eq!(int(&env, "i"), Some(199_999));
        drop(env);
    }
}
