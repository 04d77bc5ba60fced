//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction, Method};

/// Serves a cassette's interactions back one method stream at a time.
///
/// Each [`Method`] has its own queue in recorded order, so calls on one
/// port never consume answers meant for another.
pub struct CassetteReplayer {
    queues: HashMap<Method, VecDeque<Interaction>>,
    /// Last sequence number served per method, for exhaustion messages.
    served: HashMap<Method, u64>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<Method, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues.entry(interaction.method).or_default().push_back(interaction.clone());
        }
        Self { queues, served: HashMap::new() }
    }

    /// Loads a cassette YAML file and creates a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// interaction names a port its method does not belong to.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        if let Some(bad) = cassette.interactions.iter().find(|i| i.port != i.method.port()) {
            return Err(format!(
                "Cassette file {} has interaction seq={} on port {} but method {}",
                path.display(),
                bad.seq,
                bad.port.as_str(),
                bad.method,
            ));
        }
        Ok(Self::new(&cassette))
    }

    /// Return the next interaction recorded for `method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for `method`,
    /// naming what was requested and which streams the cassette holds.
    pub fn next_interaction(&mut self, method: Method) -> Interaction {
        let Some(queue) = self.queues.get_mut(&method) else {
            let mut available: Vec<String> = self.queues.keys().map(ToString::to_string).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {method}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all interactions for {method} have been consumed. \
                 Last interaction was seq={}.",
                self.served.get(&method).copied().unwrap_or_default(),
            );
        };

        self.served.insert(method, interaction.seq);
        interaction
    }
}
