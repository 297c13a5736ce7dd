//! Error types for the payroll anomaly detector.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can abort an analysis run.

use thiserror::Error;

/// The main error type for the payroll anomaly detector.
///
/// Every error is fatal to the analysis in progress. Nothing is retried and
/// no partial report is produced.
///
/// # Example
///
/// ```
/// use payroll_anomaly::error::PayrollError;
///
/// let error = PayrollError::TypeCoercion {
///     row: 3,
///     column: "Hours_Worked".to_string(),
///     value: "forty".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Row 3: column 'Hours_Worked' has non-numeric value 'forty'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The input file is missing, unreadable or not valid delimited text.
    #[error("Failed to read payroll source '{path}': {message}")]
    SourceRead {
        /// The path of the source file.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// One or more required columns are absent from the source header.
    #[error("Payroll source '{path}' is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// The path of the source file.
        path: String,
        /// The required column names that were not found.
        columns: Vec<String>,
    },

    /// A cell could not be interpreted as the number its column requires.
    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    TypeCoercion {
        /// The 1-based data row number (the header is not counted).
        row: usize,
        /// The column holding the bad value.
        column: String,
        /// The raw cell contents.
        value: String,
    },

    /// The report could not be written to the output path.
    #[error("Failed to write report '{path}': {message}")]
    SinkWrite {
        /// The output path.
        path: String,
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_read_displays_path_and_message() {
        let error = PayrollError::SourceRead {
            path: "/missing/payroll.csv".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read payroll source '/missing/payroll.csv': No such file or directory"
        );
    }

    #[test]
    fn test_missing_columns_lists_every_column() {
        let error = PayrollError::MissingColumns {
            path: "payroll.csv".to_string(),
            columns: vec!["Hours_Worked".to_string(), "Hourly_Rate".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Payroll source 'payroll.csv' is missing required columns: Hours_Worked, Hourly_Rate"
        );
    }

    #[test]
    fn test_type_coercion_displays_row_column_and_value() {
        let error = PayrollError::TypeCoercion {
            row: 2,
            column: "Hourly_Rate".to_string(),
            value: "".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 2: column 'Hourly_Rate' has non-numeric value ''"
        );
    }

    #[test]
    fn test_sink_write_displays_path_and_message() {
        let error = PayrollError::SinkWrite {
            path: "/readonly/out.xlsx".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write report '/readonly/out.xlsx': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_source_error() -> PayrollResult<()> {
            Err(PayrollError::SourceRead {
                path: "/test".to_string(),
                message: "gone".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_source_error()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(PayrollError::SourceRead { .. })
        ));
    }
}
