use crate::NodeName;

/// Errors for node names that cannot be used as container hostnames
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NodeNameError {
    #[error("node name is empty")]
    Empty,
    #[error("invalid character {1:?} in node name {0:?}")]
    InvalidChar(NodeName, char),
}

/// Checks that a node name is usable as a container hostname.
pub fn validate_node_name(name: &str) -> Result<(), NodeNameError> {
    if name.is_empty() {
        return Err(NodeNameError::Empty);
    }
    if let Some(invalid) = name
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-' && *ch != '.')
    {
        return Err(NodeNameError::InvalidChar(name.to_string(), invalid));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        validate_node_name("registry-1").expect("hostname");
        validate_node_name("node.internal").expect("fqdn");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_node_name(""), Err(NodeNameError::Empty));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            validate_node_name("registry 1"),
            Err(NodeNameError::InvalidChar("registry 1".to_string(), ' '))
        );
    }
}
