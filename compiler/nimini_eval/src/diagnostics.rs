//! Call-frame tracking for recursion limits and backtraces.

use nimini_ir::Span;

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Frames kept in a captured backtrace.
const MAX_BACKTRACE_FRAMES: usize = 32;

/// One active proc call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: String,
    /// Where the call was made, not where the proc was declared.
    pub call_span: Option<Span>,
}

/// Live stack of proc calls.
///
/// Each user-function call pushes a frame and pops it on return; the
/// depth check is part of `push`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means no depth limit.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `RecursionLimit` if the stack is full.
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the most recent frames, newest first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .take(MAX_BACKTRACE_FRAMES)
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
                span: f.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace to `err` unless it already has one or no proc
    /// is active.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn frame(name: &str) -> CallFrame {
        CallFrame {
            name: name.to_string(),
            call_span: Some(Span::new(1, 1)),
        }
    }

    #[test]
    fn push_respects_limit() {
        let mut stack = CallStack::new(Some(2));
        assert!(stack.push(frame("a")).is_ok());
        assert!(stack.push(frame("b")).is_ok());
        let err = stack.push(frame("c")).err().map(|e| e.kind);
        assert_eq!(err, Some(EvalErrorKind::RecursionLimit { limit: 2 }));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn capture_is_newest_first() {
        let mut stack = CallStack::default();
        let _ = stack.push(frame("outer"));
        let _ = stack.push(frame("inner"));
        let names: Vec<_> = stack
            .capture()
            .frames()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, vec!["inner".to_string(), "outer".to_string()]);
    }

    #[test]
    fn attach_backtrace_keeps_existing() {
        let mut stack = CallStack::default();
        let _ = stack.push(frame("f"));
        let original = EvalBacktrace::new(vec![]);
        let err = EvalError::host("boom").with_backtrace(original.clone());
        assert_eq!(stack.attach_backtrace(err).backtrace, Some(original));
    }

    #[test]
    fn capture_is_bounded() {
        let mut stack = CallStack::default();
        for i in 0..100 {
            let _ = stack.push(frame(&format!("f{i}")));
        }
        assert_eq!(stack.capture().len(), MAX_BACKTRACE_FRAMES);
        stack.pop();
        assert_eq!(stack.depth(), 99);
    }
}
