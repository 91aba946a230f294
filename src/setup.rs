use unicode_width::UnicodeWidthStr;

use crate::session::Subject;

/// What a valid setup form submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStart {
    pub subject: Subject,
    pub chapter: String,
}

/// Subject picker plus chapter text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    pub subject: Subject,
    pub chapter: String,
}

impl SetupForm {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            chapter: String::new(),
        }
    }

    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = chapter.into();
        self
    }

    pub fn next_subject(&mut self) {
        self.subject = self.subject.next();
    }

    pub fn prev_subject(&mut self) {
        self.subject = self.subject.prev();
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.chapter.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.chapter.pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.chapter.trim().is_empty()
    }

    /// Display width of the chapter text, for cursor placement
    pub fn chapter_width(&self) -> usize {
        self.chapter.width()
    }

    /// Returns the session to start, or None while the chapter is blank.
    /// The chapter is stored trimmed.
    pub fn submit(&self) -> Option<SessionStart> {
        if !self.can_submit() {
            return None;
        }
        Some(SessionStart {
            subject: self.subject,
            chapter: self.chapter.trim().to_string(),
        })
    }
}
