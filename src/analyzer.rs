//! This module provides functions for analyzing program declarations before they are
//! resolved. Hard errors (undeclared configurations, duplicates, rules that can never
//! fire) reject the program; softer findings such as unreachable configurations or
//! shadowed rules are reported as warnings.

use crate::program::{ConfigId, Program, ProgramBuilder};
use crate::symbol::Matcher;
use crate::types::{MachineError, COMPLETE_CONFIGURATION};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Represents the errors that reject a program declaration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The initial configuration is not declared.
    InvalidStartConfiguration(String),
    /// A configuration name is declared more than once.
    DuplicateConfiguration(String),
    /// Rules reference configurations that are not declared, as `from -> to` pairs.
    UndefinedConfigurations(Vec<String>),
    /// A rule in the named configuration matches an empty symbol set.
    EmptySymbolSet(String),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidStartConfiguration(name) => {
                MachineError::InvalidStartConfiguration(name)
            }
            AnalysisError::DuplicateConfiguration(name) => {
                MachineError::DuplicateConfiguration(name)
            }
            AnalysisError::UndefinedConfigurations(pairs) => {
                MachineError::UndefinedConfigurations(pairs)
            }
            AnalysisError::EmptySymbolSet(name) => MachineError::EmptySymbolSet(name),
        }
    }
}

/// Findings that do not prevent a program from running.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// Configurations that no rule path from the initial configuration reaches.
    UnreachableConfigurations(Vec<String>),
    /// A rule that an earlier rule in the same configuration always pre-empts.
    ShadowedRule {
        configuration: String,
        rule: usize,
        by: usize,
    },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::UnreachableConfigurations(names) => {
                write!(f, "Unreachable configurations detected: {:?}", names)
            }
            AnalysisWarning::ShadowedRule {
                configuration,
                rule,
                by,
            } => write!(
                f,
                "Rule {} in configuration '{}' is shadowed by rule {}",
                rule, configuration, by
            ),
        }
    }
}

type Check = fn(&ProgramBuilder, &str) -> Result<(), AnalysisError>;

/// Analyzes program declarations for errors that would make resolution impossible.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError)` describing the first violated check.
pub fn analyze(builder: &ProgramBuilder, initial: &str) -> Result<(), MachineError> {
    let checks: [Check; 4] = [
        check_start_configuration,
        check_duplicates,
        check_undefined_configurations,
        check_empty_symbol_sets,
    ];

    checks
        .iter()
        .find_map(|check| check(builder, initial).err())
        .map_or(Ok(()), |error| Err(error.into()))
}

/// Collects the non-fatal findings for a resolved program.
pub fn lint(program: &Program) -> Vec<AnalysisWarning> {
    let mut warnings = Vec::new();

    if let Some(warning) = check_unreachable_configurations(program) {
        warnings.push(warning);
    }
    warnings.extend(check_shadowed_rules(program));

    warnings
}

fn is_declared(builder: &ProgramBuilder, name: &str) -> bool {
    name == COMPLETE_CONFIGURATION || builder.configurations.iter().any(|c| c.name == name)
}

/// Checks that the initial configuration is declared.
fn check_start_configuration(
    builder: &ProgramBuilder,
    initial: &str,
) -> Result<(), AnalysisError> {
    if !is_declared(builder, initial) {
        return Err(AnalysisError::InvalidStartConfiguration(initial.to_string()));
    }

    Ok(())
}

/// Checks that no configuration name is declared twice.
fn check_duplicates(builder: &ProgramBuilder, _: &str) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();

    builder
        .configurations
        .iter()
        .find(|c| !seen.insert(c.name.as_str()))
        .map_or(Ok(()), |c| {
            Err(AnalysisError::DuplicateConfiguration(c.name.clone()))
        })
}

/// Checks that every successor named by a rule is declared.
fn check_undefined_configurations(
    builder: &ProgramBuilder,
    _: &str,
) -> Result<(), AnalysisError> {
    let mut undefined = Vec::new();

    for configuration in &builder.configurations {
        for rule in &configuration.rules {
            if !is_declared(builder, &rule.next) {
                undefined.push(format!("{} -> {}", configuration.name, rule.next));
            }
        }
    }

    if !undefined.is_empty() {
        undefined.sort();
        undefined.dedup();
        return Err(AnalysisError::UndefinedConfigurations(undefined));
    }

    Ok(())
}

/// Checks that no rule matches on an empty set, which could never fire.
fn check_empty_symbol_sets(builder: &ProgramBuilder, _: &str) -> Result<(), AnalysisError> {
    builder
        .configurations
        .iter()
        .find(|c| {
            c.rules
                .iter()
                .any(|r| matches!(&r.matcher, Matcher::AnyOf(symbols) if symbols.is_empty()))
        })
        .map_or(Ok(()), |c| Err(AnalysisError::EmptySymbolSet(c.name.clone())))
}

/// Finds declared configurations that cannot be reached from the initial one.
///
/// The synthetic `begin` configuration and the terminal `complete` configuration are
/// never reported.
fn check_unreachable_configurations(program: &Program) -> Option<AnalysisWarning> {
    let mut reachable: HashSet<ConfigId> = HashSet::new();
    let mut queue = VecDeque::from([program.initial()]);

    while let Some(id) = queue.pop_front() {
        if !reachable.insert(id) {
            continue;
        }
        queue.extend(
            program
                .configuration(id)
                .rules
                .iter()
                .map(|rule| rule.next_configuration()),
        );
    }

    let unreachable = program
        .iter()
        .filter(|(id, _)| *id != program.begin() && *id != program.complete())
        .filter(|(id, _)| !reachable.contains(id))
        .map(|(_, c)| c.name.clone())
        .collect::<Vec<_>>();

    (!unreachable.is_empty()).then_some(AnalysisWarning::UnreachableConfigurations(unreachable))
}

/// Finds rules that an earlier rule in the same configuration fully covers.
fn check_shadowed_rules(program: &Program) -> Vec<AnalysisWarning> {
    program
        .iter()
        .flat_map(|(_, configuration)| {
            configuration
                .rules
                .iter()
                .enumerate()
                .filter_map(move |(index, rule)| {
                    configuration.rules[..index]
                        .iter()
                        .position(|earlier| earlier.matcher.covers(&rule.matcher))
                        .map(|by| AnalysisWarning::ShadowedRule {
                            configuration: configuration.name.clone(),
                            rule: index,
                            by,
                        })
                })
        })
        .collect()
}
