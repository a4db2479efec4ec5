// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Built-in raga definitions and a registry for custom ones.

use std::collections::HashMap;

use super::RagaDescriptor;

/// (name, aroha, avaroha, vadi, samvadi)
const BUILTIN_RAGAS: [(&str, &str, &str, &str, &str); 8] = [
    ("Yaman", ".N R G M D N S'", "S' N D P M G R S", "G", "N"),
    ("Bhairav", "S r G m P d N S'", "S' N d P m G r S", "d", "r"),
    ("Bhupali", "S R G P D S'", "S' D P G R S", "G", "D"),
    ("Kafi", "S R g m P D n S'", "S' n D P m g R S", "P", "S"),
    ("Malkauns", "S g m d n S'", "S' n d m g S", "m", "S"),
    ("Bhimpalasi", ".n S g m P n S'", "S' n D P m g R S", "m", "S"),
    ("Todi", "S r g M d N S'", "S' N d P M g r S", "d", "g"),
    ("Durga", "S R m P D S'", "S' D P m R S", "m", "S"),
];

/// Registry of raga descriptors, looked up case-insensitively
#[derive(Debug, Clone, Default)]
pub struct RagaCatalog {
    ragas: HashMap<String, RagaDescriptor>,
}

impl RagaCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in ragas registered
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for (name, aroha, avaroha, vadi, samvadi) in BUILTIN_RAGAS {
            catalog.register(
                RagaDescriptor::new(name, aroha, avaroha)
                    .with_primary(vadi)
                    .with_secondary(samvadi),
            );
        }
        catalog
    }

    /// Register a raga, replacing any with the same name
    pub fn register(&mut self, raga: RagaDescriptor) {
        self.ragas.insert(raga.name.to_lowercase(), raga);
    }

    /// Get a raga by name
    pub fn get(&self, name: &str) -> Option<&RagaDescriptor> {
        self.ragas.get(&name.trim().to_lowercase())
    }

    /// Sorted names of all registered ragas
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ragas.values().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.ragas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ragas.is_empty()
    }
}
