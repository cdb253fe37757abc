pub mod time;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x',
    'y', 'z',
];

/// 21 character id, used for workflow keys.
pub fn longid() -> String {
    nanoid::nanoid!(21, &ID_ALPHABET)
}

/// 10 character id, used for nodes and edges.
pub fn shortid() -> String {
    nanoid::nanoid!(10, &ID_ALPHABET)
}

pub fn node_id() -> String {
    format!("node_{}", shortid())
}

pub fn edge_id() -> String {
    format!("edge_{}", shortid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shapes() {
        assert_eq!(longid().len(), 21);
        assert_eq!(shortid().len(), 10);
        assert!(node_id().starts_with("node_"));
        assert!(edge_id().starts_with("edge_"));
        assert_ne!(node_id(), node_id());
    }
}
