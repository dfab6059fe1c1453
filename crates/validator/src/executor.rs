//! The validation interpreter
//!
//! Each annotated field seeds a work-list with `(value, path, instructions)`.
//! Items are popped and the first remaining instruction is dispatched through
//! the registry; its [`CallbackResult`] decides what happens next:
//!
//! | outcome      | effect                                                      |
//! |--------------|-------------------------------------------------------------|
//! | `Pass`       | same value, rest of the instructions                        |
//! | `Stop`       | value is done                                               |
//! | `Fail`       | errors collected, value is done                             |
//! | `Recurse(v)` | each element of `v`, in order, with the rest of the list    |
//!
//! Field errors are collected across the whole record. Configuration errors
//! (unknown validator, malformed token, callback error) abort immediately.

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::{Error, Violations};
use crate::instruction::{Instruction, Instructions};
use crate::metadata::metadata_for;
use crate::record::{Record, resolve};
use crate::registry::{self, Registry};
use crate::value::{Reflect, Value};

/// Runs validations against one registry.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'r> {
    registry: &'r Registry,
}

/// A value waiting for its remaining instructions.
struct Pending<'a> {
    value: Value<'a>,
    path: String,
    remaining: &'a [Instruction],
}

/// Where the values being checked come from.
#[derive(Clone, Copy)]
struct Origin<'a> {
    record: Option<&'a dyn Record>,
    field: &'a str,
}

impl<'r> Executor<'r> {
    /// Creates an executor dispatching through `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Creates an executor over the process-wide registry.
    pub fn global() -> Executor<'static> {
        Executor::new(registry::global())
    }

    /// Validates every annotated field of `record`, promoted fields included.
    pub fn validate_record(&self, record: &dyn Record) -> Result<(), Error> {
        let meta = metadata_for(record.record_type());
        let mut violations = Violations::new();

        for (name, field) in meta.fields() {
            let instructions = field.instructions();
            if instructions.is_empty() {
                continue;
            }
            let value = resolve(record, field.embedded_path(), name).unwrap_or(Value::Nil);
            let origin = Origin {
                record: Some(record),
                field: name,
            };
            self.run(origin, value, instructions, &mut violations)?;
        }

        violations.into_result().map_err(Error::Violations)
    }

    /// Validates a bare value against an annotation string.
    pub fn validate_value<T: Reflect + ?Sized>(
        &self,
        value: &T,
        instructions: &str,
    ) -> Result<(), Error> {
        let instructions = Instructions::parse(instructions);
        let mut violations = Violations::new();
        let origin = Origin {
            record: None,
            field: "",
        };
        self.run(origin, value.reflect(), &instructions, &mut violations)?;
        violations.into_result().map_err(Error::Violations)
    }

    fn run<'a>(
        &self,
        origin: Origin<'a>,
        value: Value<'a>,
        instructions: &'a [Instruction],
        violations: &mut Violations,
    ) -> Result<(), Error>
    where
        'r: 'a,
    {
        let mut work = vec![Pending {
            value,
            path: origin.field.to_owned(),
            remaining: instructions,
        }];

        while let Some(Pending {
            value,
            path,
            remaining,
        }) = work.pop()
        {
            let Some((instruction, rest)) = remaining.split_first() else {
                continue;
            };

            let (name, params) = match instruction {
                Instruction::Call { name, params } => (name.as_str(), params.as_str()),
                Instruction::Malformed { raw } => {
                    return Err(Error::MalformedInstruction {
                        field: path,
                        raw: raw.clone(),
                    });
                }
            };

            let Some(callback) = self.registry.lookup(name) else {
                return Err(Error::UnknownValidator {
                    field: path,
                    validator: name.to_owned(),
                });
            };

            tracing::trace!(field = %path, validator = name, params, "running validator");

            let call = CallbackParameters {
                value,
                record: origin.record,
                field: origin.field,
                validator: name,
                params,
                path,
                registry: self.registry,
            };
            let outcome = callback(&call);
            let CallbackParameters { value, path, .. } = call;

            match outcome {
                Err(source) => {
                    return Err(match source.into_nested() {
                        Ok(inner) => Error::Nested {
                            field: path,
                            source: inner,
                        },
                        Err(source) => Error::Callback {
                            field: path,
                            validator: name.to_owned(),
                            source,
                        },
                    });
                }
                Ok(CallbackResult::Pass) => work.push(Pending {
                    value,
                    path,
                    remaining: rest,
                }),
                Ok(CallbackResult::Stop) => {}
                Ok(CallbackResult::Fail(errors)) => {
                    if errors.is_empty() {
                        return Err(Error::EmptyFailure {
                            field: path,
                            validator: name.to_owned(),
                        });
                    }
                    violations.extend(errors);
                }
                Ok(CallbackResult::Recurse(children)) => {
                    if children.is_empty() {
                        continue;
                    }
                    if rest.is_empty() {
                        return Err(Error::EmptyInstructions {
                            field: path,
                            validator: name.to_owned(),
                        });
                    }
                    // Reversed so elements are popped in declaration order.
                    let base = path;
                    for (i, child) in children.into_iter().enumerate().rev() {
                        work.push(Pending {
                            value: child,
                            path: format!("{base}[{i}]"),
                            remaining: rest,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Validates `record` with the process-wide registry.
pub fn validate_record(record: &dyn Record) -> Result<(), Error> {
    Executor::global().validate_record(record)
}

/// Validates a bare value against `instructions` with the process-wide
/// registry.
pub fn validate_value<T: Reflect + ?Sized>(value: &T, instructions: &str) -> Result<(), Error> {
    Executor::global().validate_value(value, instructions)
}
