//! `Enumerator`: a restartable, forward-only cursor over a live collection.
//!
//! The cursor never copies its source. It reads length and items through a
//! weak handle on every call, so changes to the collection between calls are
//! seen immediately. Moving past the end is allowed and is not clamped;
//! `item()` simply yields `undefined` until `moveFirst()`.

use std::any::Any;

use tracing::{debug, trace};

use super::{with_host, with_host_mut};
use crate::runner::ds::collection::EnumerableSource;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsHostObject, JsObject, ObjectBase, ObjectType};
use crate::runner::ds::operations::type_conversion::to_display_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};
use crate::runner::profile::{CapabilitySet, FeatureFlag};

pub const ENUMERATOR_CLASS: &str = "Enumerator";

const NOT_ENUMERABLE: &str = "object is not enumerable";

#[derive(Clone)]
pub struct Enumerator {
    base: ObjectBase,
    source: EnumerableSource,
    index: usize,
}

impl Enumerator {
    /// A cursor over nothing; at end from the start.
    pub fn empty() -> Self {
        Enumerator {
            base: ObjectBase::new(),
            source: EnumerableSource::Empty,
            index: 0,
        }
    }

    /// Binds a cursor to `value`.
    ///
    /// `undefined` gives an empty cursor under every profile. Any other value
    /// is rejected outright when the profile makes the constructor throw.
    /// Otherwise collections bind directly, objects with an indirect source
    /// (forms) bind to that source, and everything else is a `TypeError`.
    pub fn construct(value: &JsValue, capabilities: &CapabilitySet) -> Result<Self, JErrorType> {
        if value.is_undefined() {
            trace!("enumerator over nothing");
            return Ok(Self::empty());
        }
        if capabilities.has_feature(FeatureFlag::JsEnumeratorConstructorThrows) {
            debug!(profile = %capabilities.profile(), "enumerator construction rejected");
            return Err(JErrorType::TypeError(NOT_ENUMERABLE.to_string()));
        }

        let source = match value {
            JsValue::Object(handle) => {
                let obj = (**handle).borrow();
                if obj.is_enumerable_source() {
                    debug!(class = obj.as_js_object().class_name(), "enumerator bound to collection");
                    Some(EnumerableSource::live(handle))
                } else {
                    obj.as_js_object()
                        .indirect_source()
                        .filter(|src| (**src).borrow().is_enumerable_source())
                        .map(|src| {
                            debug!(
                                class = obj.as_js_object().class_name(),
                                "enumerator bound to indirect source"
                            );
                            EnumerableSource::live(&src)
                        })
                }
            }
            _ => None,
        };

        match source {
            Some(source) => Ok(Enumerator {
                base: ObjectBase::new(),
                source,
                index: 0,
            }),
            None => Err(JErrorType::TypeError(format!(
                "{} ({})",
                NOT_ENUMERABLE,
                to_display_string(value)
            ))),
        }
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.source.length()
    }

    /// The current item as a fresh, case-insensitive shallow copy, or
    /// `undefined` past the end. Primitives come back as they are.
    pub fn item(&self) -> JsValue {
        if self.at_end() {
            return JsValue::Undefined;
        }
        match self.source.get(self.index) {
            JsValue::Object(stored) => {
                let mut copy = (*stored).borrow().shallow_clone();
                copy.as_js_object_mut().set_case_sensitive(false);
                JsValue::Object(copy.into_handle())
            }
            primitive => primitive,
        }
    }

    pub fn move_first(&mut self) {
        self.index = 0;
    }

    pub fn move_next(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source(&self) -> &EnumerableSource {
        &self.source
    }
}

impl JsObject for Enumerator {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn class_name(&self) -> &str {
        ENUMERATOR_CLASS
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }
}

impl JsHostObject for Enumerator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Register the `Enumerator` class, if the capability set exposes it.
pub fn register(registry: &mut BuiltInRegistry, capabilities: &CapabilitySet) {
    if !capabilities.has_feature(FeatureFlag::JsEnumerator) {
        return;
    }
    let enumerator = BuiltInObject::new(ENUMERATOR_CLASS)
        .with_constructor(enumerator_constructor)
        .add_method("atEnd", enumerator_at_end)
        .add_method("item", enumerator_item)
        .add_method("moveFirst", enumerator_move_first)
        .add_method("moveNext", enumerator_move_next);

    registry.register_object(enumerator);
}

/// new Enumerator(value)
fn enumerator_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let value = args.into_iter().next().unwrap_or(JsValue::Undefined);
    let enumerator = Enumerator::construct(&value, ctx.capabilities())?;
    let handle = ctx.adopt_host_object(ENUMERATOR_CLASS, ObjectType::Host(Box::new(enumerator)));
    Ok(JsValue::Object(handle))
}

/// Enumerator.prototype.atEnd
fn enumerator_at_end(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(&this, ENUMERATOR_CLASS, "atEnd", |e: &Enumerator| {
        JsValue::Boolean(e.at_end())
    })
}

/// Enumerator.prototype.item
fn enumerator_item(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(&this, ENUMERATOR_CLASS, "item", |e: &Enumerator| e.item())
}

/// Enumerator.prototype.moveFirst
fn enumerator_move_first(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host_mut(&this, ENUMERATOR_CLASS, "moveFirst", |e: &mut Enumerator| {
        e.move_first();
        JsValue::Undefined
    })
}

/// Enumerator.prototype.moveNext
fn enumerator_move_next(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host_mut(&this, ENUMERATOR_CLASS, "moveNext", |e: &mut Enumerator| {
        e.move_next();
        JsValue::Undefined
    })
}
