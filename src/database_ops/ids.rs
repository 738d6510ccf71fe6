use uuid::Uuid;

/// Upper bound on generated id length, matching the storefront's cuid columns.
pub const MAX_ID_LEN: usize = 25;

/// Source of fresh row identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// cuid-shaped ids backed by UUIDv4 randomness: `c` followed by 24 hex chars.
///
/// The storefront API validates ids as cuids (`c` prefix, no dashes), so the
/// shape matters even though the content is plain random hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct CuidIds;

impl IdGenerator for CuidIds {
    fn next_id(&mut self) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        let mut id = String::with_capacity(MAX_ID_LEN);
        id.push('c');
        id.push_str(&hex[..MAX_ID_LEN - 1]);
        id
    }
}

/// Deterministic ids (`<prefix>0001`, `<prefix>0002`, ...).
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u32,
}

#[cfg(test)]
impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{}{:04}", self.prefix, self.next)
    }
}
