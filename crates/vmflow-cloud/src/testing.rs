//! Test doubles shared by the provider crates

use crate::executor::{CommandExecutor, ExecutionResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// Executor that answers from a script and remembers every call.
///
/// Rules match on an argv prefix; the first matching rule wins. Unmatched
/// commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Vec<(Vec<String>, ExecutionResult)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, prefix: &[&str], result: ExecutionResult) -> Self {
        let prefix = prefix.iter().map(|s| s.to_string()).collect();
        self.rules.push((prefix, result));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Number of recorded calls whose argv starts with `prefix`
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|argv| starts_with(argv, prefix))
            .count()
    }
}

fn starts_with<S: AsRef<str>>(argv: &[String], prefix: &[S]) -> bool {
    argv.len() >= prefix.len()
        && argv
            .iter()
            .zip(prefix)
            .all(|(arg, p)| arg.as_str() == p.as_ref())
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, argv: &[String], _log: bool) -> ExecutionResult {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(argv.to_vec());

        self.rules
            .iter()
            .find(|(prefix, _)| starts_with(argv, prefix))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| ExecutionResult::ok(""))
    }
}
