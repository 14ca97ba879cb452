use anyhow::Result;

use crate::domain::Prompt;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One-shot query. Only an over-long prompt is an error; everything that
    /// goes wrong on the wire comes back as display text.
    pub async fn ask(&self, prompt: String) -> Result<String> {
        let prompt = Prompt::new(prompt)?;
        let use_case = self.container.submit_use_case();
        Ok(use_case.execute(prompt).await)
    }
}
