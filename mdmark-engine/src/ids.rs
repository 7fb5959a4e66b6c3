//! Highlight id generation

use crate::annotation::AnnotationId;
use uuid::Uuid;

/// Source of collision-free highlight ids for the lifetime of a session
pub trait IdGenerator {
    fn next_id(&mut self) -> AnnotationId;
}

/// Random v4 UUIDs. The default for interactive sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> AnnotationId {
        AnnotationId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids (`hl-1`, `hl-2`, ...), for reproducible output
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("hl")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> AnnotationId {
        let id = AnnotationId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
