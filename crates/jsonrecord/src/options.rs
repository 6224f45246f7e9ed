use alloc::string::String;

/// Configuration options for the [`Decoder`](crate::Decoder).
///
/// The defaults reproduce the plain naming scheme: records are numbered
/// `"1"`, `"2"`, ..., array entities are suffixed with `"[]"` and array
/// elements are named by their 1-based position.
///
/// # Examples
///
/// ```rust
/// use jsonrecord::{Decoder, DecoderOptions};
///
/// let decoder = Decoder::new(DecoderOptions {
///     record_id: "rec-%d".into(),
///     record_count: 100,
///     ..Default::default()
/// });
/// assert_eq!(decoder.next_record_id(), "rec-100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Suffix appended to the entity name of every array.
    ///
    /// # Default
    ///
    /// `"[]"`
    pub array_marker: String,

    /// Template for the names of array elements. Every `%d` is replaced by
    /// the 1-based element index.
    ///
    /// # Default
    ///
    /// `"%d"`
    pub array_name: String,

    /// Template for record ids. Every `%d` is replaced by the record counter.
    ///
    /// # Default
    ///
    /// `"%d"`
    pub record_id: String,

    /// Value of the record counter for the first record, and the value it is
    /// restored to by [`Decoder::reset`](crate::Decoder::reset).
    ///
    /// # Default
    ///
    /// `1`
    pub record_count: u64,

    /// Suffix appended to the name of boolean literals.
    ///
    /// # Default
    ///
    /// `None`
    pub boolean_marker: Option<String>,

    /// Suffix appended to the name of number literals.
    ///
    /// # Default
    ///
    /// `None`
    pub number_marker: Option<String>,

    /// Whether `// line` and `/* block */` comments are skipped like
    /// whitespace.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            array_marker: "[]".into(),
            array_name: "%d".into(),
            record_id: "%d".into(),
            record_count: 1,
            boolean_marker: None,
            number_marker: None,
            allow_comments: false,
        }
    }
}
