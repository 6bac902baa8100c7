/// How a tool's exit status and output are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    ignore_errors: bool,
    ignore_exit_codes: Vec<i32>,
    suppress_stderr: bool,
    none_on_ignored_error: bool,
}

impl ExecOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for auxiliary metadata queries: any failure yields `None`.
    #[must_use]
    pub fn lookup() -> Self {
        Self::new().ignoring_errors().none_on_ignored_error()
    }

    #[must_use]
    pub fn ignoring_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Some tools exit non-zero to mean "differences found".
    #[must_use]
    pub fn ignoring_exit_code(mut self, code: i32) -> Self {
        self.ignore_exit_codes.push(code);
        self
    }

    #[must_use]
    pub fn without_stderr(mut self) -> Self {
        self.suppress_stderr = true;
        self
    }

    #[must_use]
    pub fn none_on_ignored_error(mut self) -> Self {
        self.none_on_ignored_error = true;
        self
    }

    #[must_use]
    pub fn ignores_errors(&self) -> bool {
        self.ignore_errors
    }

    #[must_use]
    pub fn ignores_exit_code(&self, code: Option<i32>) -> bool {
        self.ignore_errors || code.is_some_and(|c| self.ignore_exit_codes.contains(&c))
    }

    #[must_use]
    pub fn suppresses_stderr(&self) -> bool {
        self.suppress_stderr
    }

    #[must_use]
    pub fn returns_none_on_ignored_error(&self) -> bool {
        self.none_on_ignored_error
    }
}
