//! Wiring into a documentation host's docstring event.
//!
//! A host fires [`PROCESS_DOCSTRING_EVENT`] once per documented object with
//! the object's docstring as a mutable list of lines. [`setup`] connects
//! the standard rewriter to that event; [`HookRegistry`] is a minimal
//! in-process host used by the command-line tool and tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::rewriter::Rewriter;

/// Fired after a docstring has been extracted, before it is rendered.
pub const PROCESS_DOCSTRING_EVENT: &str = "autodoc-process-docstring";

/// The host's description of the object a docstring belongs to.
///
/// Hosts also hand over the documented object and their own options; the
/// rewriter reads neither, so they are not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocstringContext<'a> {
    /// Kind of object, e.g. `"function"` or `"class"`. Not interpreted.
    pub what: &'a str,
    /// Fully qualified name, used to label diagnostics.
    pub name: &'a str,
}

pub type DocstringListener = Box<dyn Fn(&DocstringContext<'_>, &mut [String]) + Send + Sync>;

/// Something that docstring listeners can be connected to.
pub trait DocumentationHost {
    fn connect(&mut self, event: &str, listener: DocstringListener);
}

/// Rewrite the annotations in one docstring with the standard rewriter.
///
/// Failures are logged and never returned; the docstring keeps whatever
/// could be rewritten.
pub fn process_docstring(context: &DocstringContext<'_>, lines: &mut [String]) {
    Rewriter::standard().rewrite_lines(context.name, lines);
}

/// Register [`process_docstring`] with `host`.
pub fn setup(host: &mut impl DocumentationHost) {
    host.connect(PROCESS_DOCSTRING_EVENT, Box::new(process_docstring));
}

/// Register a configured rewriter with `host`.
pub fn setup_with(host: &mut impl DocumentationHost, rewriter: Arc<Rewriter>) {
    host.connect(
        PROCESS_DOCSTRING_EVENT,
        Box::new(move |context: &DocstringContext<'_>, lines: &mut [String]| {
            rewriter.rewrite_lines(context.name, lines);
        }),
    );
}

/// Listeners keyed by event name, called in connection order.
#[derive(Default)]
pub struct HookRegistry {
    listeners: HashMap<String, Vec<DocstringListener>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every listener connected to `event`. Returns how many ran.
    pub fn emit(&self, event: &str, context: &DocstringContext<'_>, lines: &mut [String]) -> usize {
        let Some(listeners) = self.listeners.get(event) else {
            log::trace!("no listeners for {event}");
            return 0;
        };
        for listener in listeners {
            listener(context, lines);
        }
        listeners.len()
    }
}

impl DocumentationHost for HookRegistry {
    fn connect(&mut self, event: &str, listener: DocstringListener) {
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(event, listeners)| (event.as_str(), listeners.len()))
            .collect();
        f.debug_struct("HookRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
