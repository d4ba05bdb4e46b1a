//! Cross-crate tests live under `tests/`; shared fixtures under `tests/common`.
