//! SEV-style memory encryption.
//!
//! A deliberately toy model: values are XOR-transformed with a symmetric
//! key and physical addresses are scrambled with a word-aligned mask of the
//! same key. Rotating the key invalidates prior plaintext equivalence,
//! which is the observable side effect the model exists to exercise. This
//! is a didactic stand-in and must not be replaced with real cryptography.

/// XOR-keyed memory transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct SevMemory {
    key: u64,
}

impl SevMemory {
    /// Creates a transform with the given key (0 is the identity).
    pub const fn new(key: u64) -> Self {
        Self { key }
    }

    /// Installs a new key. Data written under the old key no longer
    /// decrypts to its original plaintext.
    pub fn set_key(&mut self, key: u64) {
        self.key = key;
    }

    /// Current key.
    pub const fn key(&self) -> u64 {
        self.key
    }

    /// True when a non-zero key is active.
    pub const fn is_active(&self) -> bool {
        self.key != 0
    }

    /// Encrypts a 64-bit value.
    pub const fn encrypt(&self, data: u64) -> u64 {
        data ^ self.key
    }

    /// Decrypts a 64-bit value. XOR is its own inverse.
    pub const fn decrypt(&self, data: u64) -> u64 {
        data ^ self.key
    }

    /// Scrambles a physical address.
    ///
    /// The low 3 bits are preserved so a scrambled access still targets the
    /// same byte lane of its (relocated) backing word.
    pub const fn scramble_addr(&self, addr: u64) -> u64 {
        addr ^ (self.key & !0x7)
    }
}
