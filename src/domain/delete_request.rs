//! Delete request model for the async delete pipeline.

/// A bulk soft-delete request queued by a caller.
///
/// Travels from the request path to the background worker over a bounded
/// channel, so the caller can answer "accepted" without waiting for the
/// storage write. There is no acknowledgement channel: eventual failures are
/// visible only in the worker's logs.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub owner_id: i64,
    pub codes: Vec<String>,
}

impl DeleteRequest {
    /// Creates a new delete request for one owner's codes.
    pub fn new(owner_id: i64, codes: Vec<String>) -> Self {
        Self { owner_id, codes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_request_creation() {
        let req = DeleteRequest::new(7, vec!["abc123".to_string(), "xyz789".to_string()]);
        assert_eq!(req.owner_id, 7);
        assert_eq!(req.codes.len(), 2);
    }

    #[test]
    fn test_delete_request_clone() {
        let req = DeleteRequest::new(1, vec!["abc123".to_string()]);
        let cloned = req.clone();
        assert_eq!(cloned.owner_id, req.owner_id);
        assert_eq!(cloned.codes, req.codes);
    }
}
