use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ContractViolation {
    #[snafu(display("Illegal argument: {message}"))]
    IllegalArgument { message: String },
    #[snafu(display("Index {index} out of bounds for {len} components"))]
    IndexOutOfBounds { index: usize, len: usize },
    #[snafu(display("Invalid state: {message}"))]
    InvalidState { message: String },
    #[snafu(display("Postcondition violated: {message}"))]
    MethodFailed { message: String },
    #[snafu(display("Service failure: {message}"))]
    ServiceFailure {
        message: String,
        #[snafu(source(from(ContractViolation, Box::new)))]
        source: Box<ContractViolation>,
    },
}

impl ContractViolation {
    /// The caller passed something the operation does not accept.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            ContractViolation::IllegalArgument { .. } | ContractViolation::IndexOutOfBounds { .. }
        )
    }

    /// The receiver's state forbids the operation.
    pub fn is_state_error(&self) -> bool {
        matches!(self, ContractViolation::InvalidState { .. })
    }

    /// Follows aggregated failures down to the error that started them.
    pub fn root_cause(&self) -> &ContractViolation {
        match self {
            ContractViolation::ServiceFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
