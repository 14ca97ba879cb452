use super::{utf16_len, Prompt, MAX_PROMPT_LENGTH};

/// Everything the prompt box can be asked to do.
///
/// Positions and lengths count `char`s of the current buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Insert { position: usize, text: String },
    Delete { position: usize, len: usize },
    Replace { position: usize, len: usize, text: String },
    SubmitTriggered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOutcome {
    Applied,
    /// The edit would overflow the buffer or pointed outside it; nothing changed.
    Rejected,
    Submitted(Prompt),
}

/// Prompt buffer with a hard length cap.
///
/// Edits that would take the buffer past [`MAX_PROMPT_LENGTH`] UTF-16 code
/// units are dropped whole rather than truncated, so the buffer is always a
/// valid [`Prompt`].
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    text: String,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn remaining(&self) -> usize {
        MAX_PROMPT_LENGTH.saturating_sub(self.len_utf16())
    }

    /// Snapshot handed to the query client on submission.
    pub fn snapshot(&self) -> Prompt {
        Prompt::new(self.text.clone()).unwrap_or_default()
    }

    pub fn insert(&mut self, position: usize, text: &str) -> bool {
        let Some(at) = self.byte_offset(position) else {
            return false;
        };
        if self.len_utf16() + utf16_len(text) > MAX_PROMPT_LENGTH {
            return false;
        }
        self.text.insert_str(at, text);
        true
    }

    pub fn delete(&mut self, position: usize, len: usize) -> bool {
        let Some((start, end)) = self.byte_range(position, len) else {
            return false;
        };
        self.text.replace_range(start..end, "");
        true
    }

    pub fn replace(&mut self, position: usize, len: usize, text: &str) -> bool {
        let Some((start, end)) = self.byte_range(position, len) else {
            return false;
        };
        let removed = utf16_len(&self.text[start..end]);
        if self.len_utf16() - removed + utf16_len(text) > MAX_PROMPT_LENGTH {
            return false;
        }
        self.text.replace_range(start..end, text);
        true
    }

    pub fn dispatch(&mut self, event: InputEvent) -> SurfaceOutcome {
        let applied = match event {
            InputEvent::Insert { position, text } => self.insert(position, &text),
            InputEvent::Delete { position, len } => self.delete(position, len),
            InputEvent::Replace {
                position,
                len,
                text,
            } => self.replace(position, len, &text),
            InputEvent::SubmitTriggered => return SurfaceOutcome::Submitted(self.snapshot()),
        };

        if applied {
            SurfaceOutcome::Applied
        } else {
            SurfaceOutcome::Rejected
        }
    }

    fn byte_offset(&self, position: usize) -> Option<usize> {
        self.text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.text.len()))
            .nth(position)
    }

    fn byte_range(&self, position: usize, len: usize) -> Option<(usize, usize)> {
        let start = self.byte_offset(position)?;
        let end = self.byte_offset(position.checked_add(len)?)?;
        Some((start, end))
    }
}
