use thiserror::Error;

/// Result type alias using GenealogyError
pub type Result<T> = std::result::Result<T, GenealogyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every error the renderer can surface. Each kind
/// maps to a code that tests and the command line front end can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Rendering
    TemplateError,
    MalformedDate,

    // Input
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::TemplateError => "ERR_TEMPLATE",
            ExErrorKind::MalformedDate => "ERR_MALFORMED_DATE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Used at the crate boundaries (store, command line) where errors from the
/// core meet IO and parsing failures.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (person) ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Innermost person named along the source chain
    pub fn failing_person(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(ExError::failing_person)
            .or(self.entity_id.as_deref())
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (person: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy of the genealogy core
///
/// Absence of mom, dad, partners or children is never an error. Only an
/// identifier that is explicitly referenced and does not resolve is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenealogyError {
    // ===== Lookup Errors =====
    /// Search by identifier or "first last" name found nobody
    #[error("person not found for search '{search}'")]
    PersonNotFound { search: String },

    /// Identifier (or UUID) reference does not resolve
    #[error("person not found for ID {id}")]
    IdNotFound { id: String },

    // ===== Rendering Errors =====
    /// The template substitution step failed
    #[error("could not render template {template}{}: {message}", person_suffix(.person_id))]
    Template {
        template: String,
        person_id: Option<String>,
        message: String,
    },

    /// Annotation frame added while unwinding the traversal recursion
    #[error("could not render {stage} for {person_id}: {source}")]
    Subtree {
        person_id: String,
        stage: String,
        #[source]
        source: Box<GenealogyError>,
    },

    /// A date could not be interpreted (only ever degraded to age -1)
    #[error("malformed date '{date}'")]
    MalformedDate { date: String },

    // ===== Input Errors =====
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Serialization error (template data encoding)
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

fn person_suffix(person_id: &Option<String>) -> String {
    match person_id {
        Some(id) => format!(" for person {}", id),
        None => String::new(),
    }
}

impl GenealogyError {
    /// Wrap this error in a traversal annotation frame
    pub fn in_subtree(self, person_id: impl Into<String>, stage: impl Into<String>) -> Self {
        GenealogyError::Subtree {
            person_id: person_id.into(),
            stage: stage.into(),
            source: Box::new(self),
        }
    }

    /// Attach the person being rendered to a template error that has none
    pub fn for_person(self, id: &str) -> Self {
        match self {
            GenealogyError::Template {
                template,
                person_id: None,
                message,
            } => GenealogyError::Template {
                template,
                person_id: Some(id.to_string()),
                message,
            },
            other => other,
        }
    }

    /// The innermost error below all annotation frames
    pub fn root_cause(&self) -> &GenealogyError {
        match self {
            GenealogyError::Subtree { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Person IDs of the annotation frames, outermost first
    pub fn subtree_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let GenealogyError::Subtree {
            person_id, source, ..
        } = current
        {
            path.push(person_id.as_str());
            current = source;
        }
        path
    }
}

/// Conversion from GenealogyError to ExError
impl From<GenealogyError> for ExError {
    fn from(err: GenealogyError) -> Self {
        match err {
            GenealogyError::PersonNotFound { search } => ExError::new(ExErrorKind::NotFound)
                .with_op("get")
                .with_message(format!("person not found for search '{}'", search)),

            GenealogyError::IdNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_op("get_by_id")
                .with_entity_id(id)
                .with_message("person not found"),

            GenealogyError::Template {
                template,
                person_id,
                message,
            } => {
                let err = ExError::new(ExErrorKind::TemplateError)
                    .with_op("render_template")
                    .with_message(format!("template {}: {}", template, message));
                match person_id {
                    Some(id) => err.with_entity_id(id),
                    None => err,
                }
            }

            GenealogyError::Subtree {
                person_id,
                stage,
                source,
            } => {
                let inner: ExError = (*source).into();
                ExError::new(inner.kind())
                    .with_op(stage)
                    .with_entity_id(person_id)
                    .with_source(inner)
            }

            GenealogyError::MalformedDate { date } => ExError::new(ExErrorKind::MalformedDate)
                .with_message(format!("malformed date '{}'", date)),

            GenealogyError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            GenealogyError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to GenealogyError
impl From<serde_json::Error> for GenealogyError {
    fn from(err: serde_json::Error) -> Self {
        GenealogyError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::TemplateError, "ERR_TEMPLATE"),
            (ExErrorKind::MalformedDate, "ERR_MALFORMED_DATE"),
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::Io, "ERR_IO"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_subtree_annotation_keeps_chain() {
        let err = GenealogyError::Template {
            template: "person".to_string(),
            person_id: Some("oma".to_string()),
            message: "unknown variable".to_string(),
        }
        .in_subtree("mama", "parent tree")
        .in_subtree("gauss", "parent tree");

        assert_eq!(err.subtree_path(), vec!["gauss", "mama"]);
        assert!(matches!(
            err.root_cause(),
            GenealogyError::Template { .. }
        ));

        let message = err.to_string();
        assert!(message.starts_with("could not render parent tree for gauss"));
        assert!(message.contains("for person oma"));
    }

    #[test]
    fn test_template_error_converts_to_ex_error() {
        let err = GenealogyError::Template {
            template: "union-tree".to_string(),
            person_id: None,
            message: "boom".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::TemplateError);
        assert!(ex.entity_id().is_none());
        assert!(ex.message().contains("union-tree"));
    }

    #[test]
    fn test_subtree_converts_with_inner_kind() {
        let err = GenealogyError::IdNotFound {
            id: "ghost".to_string(),
        }
        .in_subtree("gauss", "child tree");
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.entity_id(), Some("gauss"));
        assert_eq!(ex.source_error().and_then(|s| s.entity_id()), Some("ghost"));
        assert_eq!(ex.failing_person(), Some("ghost"));
    }

    #[test]
    fn test_failing_person_falls_back_to_outer_frame() {
        let err = GenealogyError::PersonNotFound {
            search: "Carl Gauss".to_string(),
        }
        .in_subtree("papa", "parent tree")
        .in_subtree("gauss", "parent tree");
        let ex: ExError = err.into();
        assert_eq!(ex.failing_person(), Some("papa"));

        let bare: ExError = GenealogyError::MalformedDate {
            date: "um 1800".to_string(),
        }
        .into();
        assert_eq!(bare.failing_person(), None);
    }
}
