// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A thread-safe 16-key hex keypad, shared between an input thread and the [CPU](crate::CPU)

use crate::error::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of keys on the keypad
pub const KEYS: usize = 16;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct KeyState {
    keys: [bool; KEYS],
    /// Most recent press event, consumed by `Fx0A`
    latest: Option<u8>,
}

/// The keypad. Cloning it yields another handle to the same keys.
///
/// Every operation takes the lock exactly once, so a press can never
/// land between a check and a clear.
/// # Examples
/// ```rust
/// # use chirp8::*;
/// # fn main() -> Result<()> {
/// let keypad = Keypad::new();
/// let input = keypad.clone();
/// std::thread::spawn(move || input.press(0x7)).join().unwrap()?;
/// assert!(keypad.state(0x7));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    state: Arc<Mutex<KeyState>>,
}

impl Keypad {
    /// Constructs a keypad with every key released
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, KeyState> {
        // Key state is plain bools; a panicked writer can't leave it inconsistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// Every press is recorded as the latest press event, even if the key was already held.
    ///
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let keypad = Keypad::new();
    ///
    /// // press key `7`
    /// let did_press = keypad.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = keypad.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&self, key: usize) -> Result<bool> {
        let mut state = self.lock();
        let keyref = state.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = !*keyref;
        *keyref = true;
        state.latest = Some(key as u8);
        Ok(changed)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let keypad = Keypad::new();
    /// // press key `7`
    /// keypad.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = keypad.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = keypad.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&self, key: usize) -> Result<bool> {
        let mut state = self.lock();
        let keyref = state.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        Ok(std::mem::replace(keyref, false))
    }

    /// Gets the state of a key. Keys that don't exist are never pressed.
    pub fn state(&self, key: usize) -> bool {
        self.lock().keys.get(key).copied().unwrap_or(false)
    }

    /// Releases every key, and forgets the latest press
    pub fn clear(&self) {
        *self.lock() = KeyState::default();
    }

    /// Releases a key, and reports whether it was pressed.
    ///
    /// This is a one-shot press detector: a press is only ever consumed once.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let keypad = Keypad::new();
    /// keypad.press(0x5).unwrap();
    /// assert!(keypad.consume(0x5));
    /// assert!(!keypad.consume(0x5));
    /// ```
    pub fn consume(&self, key: usize) -> bool {
        self.lock()
            .keys
            .get_mut(key)
            .map(|keyref| std::mem::replace(keyref, false))
            .unwrap_or(false)
    }

    /// Takes the latest press event, if there's been one since the last call
    pub fn take_press(&self) -> Option<u8> {
        self.lock().latest.take()
    }

    /// Takes the latest press event and releases its key, so the press
    /// is consumed exactly once.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let keypad = Keypad::new();
    /// keypad.press(0x7).unwrap();
    /// assert_eq!(Some(0x7), keypad.capture());
    /// assert!(!keypad.state(0x7));
    /// assert_eq!(None, keypad.capture());
    /// ```
    pub fn capture(&self) -> Option<u8> {
        let mut state = self.lock();
        let key = state.latest.take()?;
        if let Some(keyref) = state.keys.get_mut(key as usize) {
            *keyref = false;
        }
        Some(key)
    }
}
