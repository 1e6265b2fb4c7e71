//! Cross-crate checks of a whole run, driven by stub capabilities.

#[cfg(test)]
mod dispatch;
#[cfg(test)]
mod stubs;
