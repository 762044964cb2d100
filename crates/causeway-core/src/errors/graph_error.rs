/// Precondition violations on the diagnostic graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("item not found: {name}")]
    ItemNotFound { name: String },

    #[error("duplicate item name: {name}")]
    DuplicateItem { name: String },

    #[error("invalid relationship {cause} -> {effect}: {reason}")]
    InvalidRelationship {
        cause: String,
        effect: String,
        reason: String,
    },

    #[error("relationship not found: {cause} -> {effect}")]
    RelationshipNotFound { cause: String, effect: String },

    #[error("suspect {name} must have exactly one effect, found {found}")]
    EffectCountMismatch { name: String, found: usize },

    #[error("root-cause flag of {name} has not been determined")]
    FlagUndetermined { name: String },

    #[error("invalid transition for {name}: {reason}")]
    InvalidTransition { name: String, reason: String },
}
