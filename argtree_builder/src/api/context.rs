use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::model::CommandValues;

/// The handler of a command level, run after a successful parse.
pub type Handler = Arc<dyn Fn(&mut Context<'_>) -> Result<(), CommandError> + Send + Sync>;

/// The error returned by a failing command handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Command error: {0}")]
pub struct CommandError(pub String);

impl From<String> for CommandError {
    fn from(value: String) -> Self {
        CommandError(value)
    }
}

impl From<&str> for CommandError {
    fn from(value: &str) -> Self {
        CommandError(value.to_string())
    }
}

/// The context handed to the handler of a command level.
///
/// A handler may store objects by type, for the handlers of deeper levels to find.
pub struct Context<'a> {
    values: &'a CommandValues,
    parent: Option<&'a Context<'a>>,
    objects: HashMap<TypeId, Box<dyn Any>>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(values: &'a CommandValues, parent: Option<&'a Context<'a>>) -> Self {
        Self {
            values,
            parent,
            objects: HashMap::default(),
        }
    }

    /// The command path of this level (ex: `program sub`).
    pub fn path(&self) -> &str {
        self.values.path()
    }

    /// The parsed values of this level.
    pub fn values(&self) -> &CommandValues {
        self.values
    }

    /// The context of the parent level, if any.
    pub fn parent(&self) -> Option<&Context<'a>> {
        self.parent
    }

    /// Store `object`, replacing any previous object of the same type.
    pub fn set_object<T: Any>(&mut self, object: T) {
        self.objects.insert(TypeId::of::<T>(), Box::new(object));
    }

    /// The object of type `T` stored at this level.
    pub fn object<T: Any>(&self) -> Option<&T> {
        self.objects
            .get(&TypeId::of::<T>())
            .and_then(|object| object.downcast_ref::<T>())
    }

    /// The object of type `T` stored at the nearest level, walking up from this one.
    pub fn find_object<T: Any>(&self) -> Option<&T> {
        let mut context = Some(self);

        while let Some(current) = context {
            if let Some(object) = current.object::<T>() {
                return Some(object);
            }

            context = current.parent;
        }

        None
    }
}
