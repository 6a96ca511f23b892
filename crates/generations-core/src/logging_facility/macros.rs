//! Operation boundary macros
//!
//! `log_op_start!` hands back the [`std::time::Instant`] it was called at;
//! `log_op_end!` and `log_op_error!` take it and derive `duration_ms`.
//! Errors are logged with the innermost person the failure was annotated
//! with, so a failing branch deep in a tree is named by id.

/// Log the start of an operation and return its start time
///
/// ```
/// # use generations_core::log_op_start;
/// let started = log_op_start!("render_tree", proband = "gauss");
/// assert!(started.elapsed().as_secs() < 60);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = generations_core_types::schema::EVENT_START,
            $($($field)+)?
        );
        ::std::time::Instant::now()
    }};
}

/// Log the successful end of an operation started at `started`
///
/// ```
/// # use generations_core::{log_op_end, log_op_start};
/// let started = log_op_start!("read_database");
/// log_op_end!("read_database", started, added = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $started:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = generations_core_types::schema::EVENT_END,
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)+)?
        );
    };
}

/// Log the failure of an operation started at `started`
///
/// `err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use generations_core::{log_op_error, log_op_start, errors::GenealogyError};
/// let started = log_op_start!("render_tree");
/// let err = GenealogyError::IdNotFound { id: "ghost".to_string() };
/// log_op_error!("render_tree", started, err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $started:expr, $err:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = generations_core_types::schema::EVENT_END_ERROR,
            duration_ms = $started.elapsed().as_millis() as u64,
            person_id = ex_err.failing_person().unwrap_or_default(),
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)+)?
        );
    }};
}
