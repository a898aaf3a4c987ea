//! Seam to the host's scripting bridge. Shapes dispatch their stored
//! `(language, command)` pair here and never interpret the result; a
//! runner's error propagates unchanged to whoever triggered the action.

use anyhow::Result;

pub trait ScriptRunner {
    fn execute(&mut self, language: &str, code: &str) -> Result<()>;
}

/// Standalone runner: logs each dispatch instead of talking to a host.
#[derive(Debug, Default)]
pub struct TraceRunner;

impl ScriptRunner for TraceRunner {
    fn execute(&mut self, language: &str, code: &str) -> Result<()> {
        tracing::info!(language, code, "script dispatch");
        Ok(())
    }
}
