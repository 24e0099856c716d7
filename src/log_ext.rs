//! Thin wrappers so the rest of the crate can call `trace!`/`debug!`
//! unconditionally; they compile away to nothing when the `log` feature
//! is disabled. Mirrors `tsue`'s optional `log = ["dep:log"]` feature.

#[cfg(feature = "log")]
macro_rules! iri_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! iri_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! iri_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! iri_debug {
    ($($arg:tt)*) => {};
}

pub(crate) use iri_debug;
pub(crate) use iri_trace;
