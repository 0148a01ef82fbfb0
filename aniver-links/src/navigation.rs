// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Client-side navigation primitives.

use std::sync::{Mutex, PoisonError};

/// Navigation primitive used by the redirect resolver.
///
/// Only replace semantics are required: the resolved URL takes the place of
/// the current history entry so the legacy URL does not survive in the
/// browser history.
pub trait Navigator: Send + Sync
{
    /// Replaces the current history entry with `path`.
    fn replace(&self, path: &str,);
}

impl<N: Navigator + ?Sized,> Navigator for &N
{
    fn replace(&self, path: &str,)
    {
        (**self).replace(path,);
    }
}

/// In-memory browser history stack.
///
/// # Examples
///
/// ```
/// use aniver_links::{History, Navigator};
///
/// let history = History::new("/",);
/// history.push("/estabelecimento/abc123",);
/// history.replace("/sp/sao-paulo/loja-x",);
/// assert_eq!(history.entries(), vec!["/", "/sp/sao-paulo/loja-x"]);
/// ```
#[derive(Debug,)]
pub struct History
{
    entries: Mutex<Vec<String,>,>,
}

impl History
{
    /// Creates a history whose only entry is `initial`.
    pub fn new(initial: &str,) -> Self
    {
        Self {
            entries: Mutex::new(vec![initial.to_owned()],),
        }
    }

    /// Appends a new entry.
    pub fn push(&self, path: &str,)
    {
        self.lock().push(path.to_owned(),);
    }

    /// Returns the current entry.
    pub fn current(&self,) -> Option<String,>
    {
        self.lock().last().cloned()
    }

    /// Returns a snapshot of every entry, oldest first.
    pub fn entries(&self,) -> Vec<String,>
    {
        self.lock().clone()
    }

    fn lock(&self,) -> std::sync::MutexGuard<'_, Vec<String,>,>
    {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner,)
    }
}

impl Navigator for History
{
    fn replace(&self, path: &str,)
    {
        let mut entries = self.lock();
        match entries.last_mut() {
            Some(current,) => *current = path.to_owned(),
            None => entries.push(path.to_owned(),),
        }
    }
}
