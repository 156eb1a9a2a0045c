use rusqlite::{ffi, ErrorCode};
use termsheet_core::CoreError;

/// What the failing statement was doing; decides how a foreign-key
/// violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Read,
    Write,
    Delete,
}

pub(crate) fn map_err(op: Op, context: &str, err: rusqlite::Error) -> CoreError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => CoreError::NotFound(context.to_string()),
        ref failure if is_foreign_key_violation(failure) => match op {
            Op::Delete => {
                CoreError::InvalidOperation(format!("{context} is still referenced by invoices"))
            }
            Op::Read | Op::Write => {
                CoreError::NotFound(format!("{context}: referenced row does not exist"))
            }
        },
        other => CoreError::Storage(format!("{context}: {other}")),
    }
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}

/// Shorthand for attaching an [`Op`] and a context to rusqlite results.
pub(crate) trait SqlResultExt<T> {
    fn or_core(self, op: Op, context: impl FnOnce() -> String) -> Result<T, CoreError>;
}

impl<T> SqlResultExt<T> for rusqlite::Result<T> {
    fn or_core(self, op: Op, context: impl FnOnce() -> String) -> Result<T, CoreError> {
        self.map_err(|err| map_err(op, &context(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_maps_to_not_found() {
        let err = map_err(Op::Read, "invoice 4", rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err, CoreError::NotFound("invoice 4".into()));
    }

    #[test]
    fn foreign_key_failure_depends_on_operation() {
        let violation = || {
            rusqlite::Error::SqliteFailure(
                ffi::Error {
                    code: ErrorCode::ConstraintViolation,
                    extended_code: ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                None,
            )
        };
        assert!(matches!(
            map_err(Op::Write, "invoice", violation()),
            CoreError::NotFound(_)
        ));
        assert!(matches!(
            map_err(Op::Delete, "provider p1", violation()),
            CoreError::InvalidOperation(_)
        ));
    }

    #[test]
    fn other_failures_are_storage_errors() {
        let err = map_err(Op::Write, "provider", rusqlite::Error::InvalidQuery);
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
