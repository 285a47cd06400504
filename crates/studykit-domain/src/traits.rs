//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for language model completion
///
/// Implemented by the infrastructure layer (studykit-llm). The call is
/// blocking; implementations own any transport, timeout or retry policy.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Complete `prompt` at the given sampling temperature
    fn complete(&self, prompt: &str, temperature: f64) -> Result<String, Self::Error>;
}

impl<T: LlmProvider + ?Sized> LlmProvider for &T {
    type Error = T::Error;

    fn complete(&self, prompt: &str, temperature: f64) -> Result<String, Self::Error> {
        (**self).complete(prompt, temperature)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for Box<T> {
    type Error = T::Error;

    fn complete(&self, prompt: &str, temperature: f64) -> Result<String, Self::Error> {
        (**self).complete(prompt, temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Echo {
        seen: RefCell<Vec<(String, f64)>>,
    }

    impl LlmProvider for Echo {
        type Error = String;

        fn complete(&self, prompt: &str, temperature: f64) -> Result<String, String> {
            self.seen.borrow_mut().push((prompt.to_string(), temperature));
            Ok(prompt.to_uppercase())
        }
    }

    #[test]
    fn test_reference_forwards() {
        let echo = Echo {
            seen: RefCell::new(Vec::new()),
        };
        let by_ref = &echo;
        assert_eq!(by_ref.complete("hi", 0.7).unwrap(), "HI");
        assert_eq!(echo.seen.borrow()[0], ("hi".to_string(), 0.7));
    }

    #[test]
    fn test_box_forwards() {
        let boxed: Box<dyn LlmProvider<Error = String>> = Box::new(Echo {
            seen: RefCell::new(Vec::new()),
        });
        assert_eq!(boxed.complete("ok", 0.9).unwrap(), "OK");
    }
}
