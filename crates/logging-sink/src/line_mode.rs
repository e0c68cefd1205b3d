/// Controls whether a sink appends a trailing newline to each record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum LineMode {
    /// Append a newline terminator after each rendered record.
    #[default]
    WithNewline,
    /// Emit the rendered record without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use partition_log_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}
