pub use gs1_toolchain_diagnostics::{Diagnostic, Severity, Span, codes};
