//! Walks expression ASTs, resolving identifiers against a per-session
//! variable store first and the embedding table second.

use crate::embeddings::Embeddings;
use crate::parser::{Ast, Op, parse};
use crate::vector::{add, normalize, subtract};
use crate::{EvalError, Result};
use std::collections::{HashMap, HashSet};

/// Outcome of one successful evaluation: the result vector, the embedding
/// words it consumed (excluded from the subsequent nearest search), and the
/// variable name when the input was an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub vector: Vec<f32>,
    pub used_words: HashSet<String>,
    pub assignment: Option<String>,
}

/// One interactive session. Borrows the shared read-only embedding table
/// and exclusively owns its variable store; variables live as long as the
/// evaluator and are never cleared.
pub struct Evaluator<'a> {
    embeddings: &'a Embeddings,
    variables: HashMap<String, Vec<f32>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(embeddings: &'a Embeddings) -> Self {
        Evaluator {
            embeddings,
            variables: HashMap::new(),
        }
    }

    /// Parse and evaluate one input line. Errors abort the call without
    /// touching the variable store - an assignment commits only after its
    /// right-hand side evaluated successfully.
    pub fn evaluate(&mut self, input: &str) -> Result<EvalResult> {
        let ast = parse(input)?;
        let mut used_words = HashSet::new();

        let vector = self.eval_node(&ast, &mut used_words)?;
        let assignment = match &ast {
            Ast::Assignment { name, .. } => Some(name.clone()),
            _ => None,
        };

        Ok(EvalResult {
            vector,
            used_words,
            assignment,
        })
    }

    fn eval_node(&mut self, node: &Ast, used_words: &mut HashSet<String>) -> Result<Vec<f32>> {
        match node {
            Ast::Word(name) => {
                // Variables shadow embedding words and are not recorded
                // as used
                if let Some(vec) = self.variables.get(name) {
                    return Ok(vec.clone());
                }
                if let Some(vec) = self.embeddings.get(name) {
                    used_words.insert(name.clone());
                    return Ok(vec.to_vec());
                }
                // Underscores never appear in the embedding vocabulary,
                // so treat such names as variables that were never set
                if name.contains('_') {
                    Err(EvalError::UndefinedVariable(name.clone()))
                } else {
                    Err(EvalError::UnknownWord(name.clone()))
                }
            }
            Ast::BinaryOp { op, left, right } => {
                let left = self.eval_node(left, used_words)?;
                let right = self.eval_node(right, used_words)?;
                let combined = match op {
                    Op::Add => add(&left, &right),
                    Op::Sub => subtract(&left, &right),
                };
                // Every intermediate result stays unit length
                Ok(normalize(&combined))
            }
            Ast::Assignment { name, expr } => {
                let vec = self.eval_node(expr, used_words)?;
                self.variables.insert(name.clone(), vec.clone());
                Ok(vec)
            }
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn list_variables(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }
}
