use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use crate::llm::{Generation, Generator};

type Script = Box<dyn Fn(&str, &str) -> Result<Generation> + Send + Sync>;

/// Generator driven by a closure over `(model, prompt)` that records every
/// model it was asked to use.
pub struct ScriptedGenerator {
    script: Script,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Generation> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `response`.
    pub fn always(response: &str) -> Self {
        let response = Generation::from(response);
        Self::new(move |_, _| Ok(response.clone()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation> {
        self.calls.lock().unwrap().push(model.to_string());
        (self.script)(model, prompt)
    }
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events into a buffer until the guard drops.
/// Works with `#[tokio::test]`, which runs on the current thread.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
