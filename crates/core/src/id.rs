//! Identifier helpers.

/// Returns a random (version 4) UUID in its hyphenated lowercase form.
///
/// Handy for giving new records a primary key before adding them.
pub fn uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_format() {
        let id = uuid();
        assert_eq!(id.len(), 36);
        assert_eq!(id.as_bytes()[14], b'4');
        assert_eq!(id.matches('-').count(), 4);
        assert_ne!(id, uuid());
    }
}
