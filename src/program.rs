//! This module defines configurations, their rules and the `Program` that owns them.
//!
//! Programs are declared by name through a `ProgramBuilder`. Rules name their successor
//! configuration as a string, so configurations can refer to each other in any order;
//! `ProgramBuilder::build` resolves every name to a `ConfigId` once all of them are known.

use crate::analyzer::{analyze, lint};
use crate::operation::Operation;
use crate::symbol::{none, Matcher};
use crate::types::{MachineError, BEGIN_CONFIGURATION, COMPLETE_CONFIGURATION};
use log::warn;
use std::collections::HashMap;

/// Index of a configuration inside its `Program`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigId(usize);

/// A single symbol-matched transition within a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The symbols this rule applies to.
    pub matcher: Matcher,
    /// Operations performed in order, one per step.
    pub operations: Vec<Operation>,
    next: ConfigId,
}

impl Rule {
    /// The configuration the machine adopts once the operations are done.
    pub fn next_configuration(&self) -> ConfigId {
        self.next
    }
}

/// A named machine state with its ordered rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Configuration {
    /// Finds the first rule, in declaration order, that matches `symbol`.
    pub fn find_rule(&self, symbol: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matcher.matches(symbol))
    }
}

/// A resolved set of configurations with a designated initial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    configurations: Vec<Configuration>,
    initial: ConfigId,
    begin: ConfigId,
    complete: ConfigId,
}

impl Program {
    /// Starts declaring a program called `name`.
    pub fn builder(name: impl Into<String>) -> ProgramBuilder {
        ProgramBuilder {
            name: name.into(),
            configurations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration the first real step runs in.
    pub fn initial(&self) -> ConfigId {
        self.initial
    }

    /// The synthetic configuration a fresh machine reports. Its only rule redirects a
    /// blank cell to the initial configuration without touching the tape.
    pub fn begin(&self) -> ConfigId {
        self.begin
    }

    /// The terminal configuration.
    pub fn complete(&self) -> ConfigId {
        self.complete
    }

    pub fn configuration(&self, id: ConfigId) -> &Configuration {
        &self.configurations[id.0]
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Looks up a declared configuration by name.
    pub fn configuration_id(&self, name: &str) -> Option<ConfigId> {
        self.configurations
            .iter()
            .position(|c| c.name == name)
            .filter(|&index| index != self.begin.0)
            .map(ConfigId)
    }

    /// Iterates over every configuration with its id.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &Configuration)> {
        self.configurations
            .iter()
            .enumerate()
            .map(|(index, c)| (ConfigId(index), c))
    }
}

/// A rule whose successor is still a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleDraft {
    pub(crate) matcher: Matcher,
    pub(crate) operations: Vec<Operation>,
    pub(crate) next: String,
}

/// Collects the rules of one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationBuilder {
    pub(crate) name: String,
    pub(crate) rules: Vec<RuleDraft>,
}

impl ConfigurationBuilder {
    /// Appends a rule: when the scanned symbol matches, perform `operations` and then
    /// continue in the configuration called `next`.
    pub fn rule<M, I>(mut self, matcher: M, operations: I, next: &str) -> Self
    where
        M: Into<Matcher>,
        I: IntoIterator<Item = Operation>,
    {
        self.rules.push(RuleDraft {
            matcher: matcher.into(),
            operations: operations.into_iter().collect(),
            next: next.to_string(),
        });
        self
    }
}

/// Declares the configurations of a `Program`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramBuilder {
    pub(crate) name: String,
    pub(crate) configurations: Vec<ConfigurationBuilder>,
}

impl ProgramBuilder {
    /// Declares a configuration called `name` with the rules added by `rules`.
    pub fn configuration<F>(mut self, name: &str, rules: F) -> Self
    where
        F: FnOnce(ConfigurationBuilder) -> ConfigurationBuilder,
    {
        self.configurations.push(rules(ConfigurationBuilder {
            name: name.to_string(),
            rules: Vec::new(),
        }));
        self
    }

    /// Validates the declarations and resolves successor names.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` starting in the configuration called `initial`.
    /// * `Err(MachineError)` if the analyzer rejects the declarations.
    pub fn build(self, initial: &str) -> Result<Program, MachineError> {
        analyze(&self, initial)?;

        let mut index: HashMap<String, ConfigId> = self
            .configurations
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), ConfigId(i)))
            .collect();

        let mut declared = self.configurations;
        if !index.contains_key(COMPLETE_CONFIGURATION) {
            index.insert(COMPLETE_CONFIGURATION.to_string(), ConfigId(declared.len()));
            declared.push(ConfigurationBuilder {
                name: COMPLETE_CONFIGURATION.to_string(),
                rules: Vec::new(),
            });
        }

        let resolve = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| MachineError::UndefinedConfigurations(vec![name.to_string()]))
        };

        let initial = resolve(initial)?;
        let complete = resolve(COMPLETE_CONFIGURATION)?;

        let mut configurations = declared
            .into_iter()
            .map(|c| -> Result<Configuration, MachineError> {
                let rules = c
                    .rules
                    .into_iter()
                    .map(|r| -> Result<Rule, MachineError> {
                        Ok(Rule {
                            matcher: r.matcher,
                            operations: r.operations,
                            next: resolve(&r.next)?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Configuration {
                    name: c.name,
                    rules,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let begin = ConfigId(configurations.len());
        configurations.push(Configuration {
            name: BEGIN_CONFIGURATION.to_string(),
            rules: vec![Rule {
                matcher: none(),
                operations: Vec::new(),
                next: initial,
            }],
        });

        let program = Program {
            name: self.name,
            configurations,
            initial,
            begin,
            complete,
        };

        for warning in lint(&program) {
            warn!("{}: {}", program.name, warning);
        }

        Ok(program)
    }
}
