use tracing::trace;

use crate::{
    ast::{Segment, Selector},
    error::PathError,
    options::Options,
    resolver::{matching, resolve},
    value::{Array, Object, Record, Value, ValueType},
};

/// Outcome of evaluating a path suffix against one node.
///
/// `Miss` means a recursive (`..`) search ran into a dead end. It is not an
/// error: sibling branches keep searching, and only the top-level call turns
/// an overall miss into `NotFound`.
#[derive(Debug)]
pub enum Step<T> {
    Done(T),
    Miss,
    Fail(PathError),
}

impl<T> Step<T> {
    /// Under `..`, a match whose remaining path does not fit the data is
    /// simply not a match.
    fn soften(self, segment: &Segment) -> Self {
        match self {
            Step::Fail(err) if segment.recursive => {
                trace!(segment = %segment, error = %err, "recursive match skipped");
                Step::Miss
            }
            other => other,
        }
    }
}

/// Results gathered across the branches a segment fans out to.
trait Gather: Default {
    fn merge(&mut self, other: Self);
    fn is_empty(&self) -> bool;
}

impl Gather for Vec<Value> {
    fn merge(&mut self, other: Self) {
        self.extend(other);
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// Set gathers whether any value was written
impl Gather for bool {
    fn merge(&mut self, other: Self) {
        *self |= other;
    }

    fn is_empty(&self) -> bool {
        !*self
    }
}

#[derive(Default)]
struct Fanout<T> {
    acc: T,
    missed: bool,
}

impl<T: Gather> Fanout<T> {
    fn absorb(&mut self, step: Step<T>) -> Result<(), PathError> {
        match step {
            Step::Done(found) => self.acc.merge(found),
            Step::Miss => self.missed = true,
            Step::Fail(err) => return Err(err),
        }
        Ok(())
    }

    fn extend(&mut self, other: Fanout<T>) {
        self.acc.merge(other.acc);
        self.missed |= other.missed;
    }

    fn finish(self, segment: &Segment) -> Step<T> {
        if self.acc.is_empty() && (self.missed || segment.recursive) {
            Step::Miss
        } else {
            Step::Done(self.acc)
        }
    }
}

/// Removes repeated keys, keeping the first occurrence.
fn unique(keys: &[String]) -> Vec<&String> {
    let mut out: Vec<&String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Walks a value tree along a list of segments.
///
/// Both walks recurse once per segment and once per level of `..` search, so
/// stack depth grows with path length times data depth.
pub struct Evaluator<'p> {
    source: &'p str,
    options: &'p Options,
}

impl<'p> Evaluator<'p> {
    pub fn new(source: &'p str, options: &'p Options) -> Self {
        Evaluator { source, options }
    }

    fn not_found(&self, message: impl Into<String>) -> PathError {
        PathError::not_found(message, self.source)
    }

    /// A terminal value was reached while segments remain.
    fn dead_end<T>(&self, segment: &Segment) -> Step<T> {
        if segment.recursive {
            trace!(path = self.source, segment = %segment, "recursive search reached a leaf");
            Step::Miss
        } else {
            Step::Fail(self.not_found("path not found"))
        }
    }

    // ------------------------------------------------------------------
    // Get
    // ------------------------------------------------------------------

    /// Collects every value `segments` selects below `node`.
    pub fn get(&self, node: &Value, segments: &[Segment]) -> Step<Vec<Value>> {
        let Some((segment, rest)) = segments.split_first() else {
            return Step::Done(vec![node.clone()]);
        };

        match node.resolve() {
            Some(Value::Object(obj)) => self.get_object(obj, segment, segments, rest),
            Some(Value::Array(arr)) => self.get_array(arr, segment, segments, rest),
            Some(Value::Record(rec)) => self.get_record(rec, segment, segments, rest),
            _ => self.dead_end(segment),
        }
    }

    fn get_object(
        &self,
        obj: &Object,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
    ) -> Step<Vec<Value>> {
        let children: Vec<(&Value, bool)> = match &segment.selector {
            Selector::Indexes(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access map with an index"));
            }
            Selector::Keys(keys) if !segment.recursive => {
                let mut children = Vec::with_capacity(keys.len());
                for key in unique(keys) {
                    match obj.get(key) {
                        Some(child) => children.push((child, true)),
                        None => {
                            return Step::Fail(
                                self.not_found(format!("key does not exist ({})", key)),
                            );
                        }
                    }
                }
                children
            }
            _ => obj
                .entries
                .iter()
                .map(|(key, child)| (child, segment.is_wildcard() || segment.names_key(key)))
                .collect(),
        };
        self.get_children(children, segment, segments, rest)
    }

    fn get_array(
        &self,
        arr: &Array,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
    ) -> Step<Vec<Value>> {
        let children: Vec<(&Value, bool)> = match &segment.selector {
            Selector::Keys(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access array with a key"));
            }
            Selector::Indexes(specs) if !segment.recursive => match resolve(specs, arr.len(), true) {
                Ok(positions) => positions.into_iter().map(|i| (&arr.items[i], true)).collect(),
                Err(err) => return Step::Fail(self.not_found(err.to_string())),
            },
            Selector::Indexes(specs) => {
                let hits = matching(specs, arr.len());
                arr.items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| (child, hits.contains(&i)))
                    .collect()
            }
            _ => arr
                .items
                .iter()
                .map(|child| (child, segment.is_wildcard()))
                .collect(),
        };
        self.get_children(children, segment, segments, rest)
    }

    fn get_record(
        &self,
        rec: &Record,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
    ) -> Step<Vec<Value>> {
        let tag = self.options.field_tag.as_deref();
        let children: Vec<(&Value, bool)> = match &segment.selector {
            Selector::Indexes(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access struct with an index"));
            }
            Selector::Keys(keys) if !segment.recursive => {
                let mut children = Vec::with_capacity(keys.len());
                for key in unique(keys) {
                    match rec.field(key, tag) {
                        Some(field) => children.push((&field.value, true)),
                        None => {
                            return Step::Fail(
                                self.not_found(format!("field does not exist ({})", key)),
                            );
                        }
                    }
                }
                children
            }
            _ => rec
                .fields
                .iter()
                .filter_map(|field| {
                    field.address(tag).map(|name| {
                        (&field.value, segment.is_wildcard() || segment.names_key(name))
                    })
                })
                .collect(),
        };
        self.get_children(children, segment, segments, rest)
    }

    /// Evaluates the branches for each selected child. `target` marks children
    /// the segment itself matched, as opposed to ones a recursive search only
    /// passes through.
    fn get_children(
        &self,
        children: Vec<(&Value, bool)>,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
    ) -> Step<Vec<Value>> {
        let mut found = Fanout::<Vec<Value>>::default();
        for (child, target) in children {
            if segment.recursive
                && let Err(err) = found.absorb(self.get(child, segments))
            {
                return Step::Fail(err);
            }
            if (!segment.recursive || target)
                && let Err(err) = found.absorb(self.get(child, rest).soften(segment))
            {
                return Step::Fail(err);
            }
        }
        found.finish(segment)
    }

    // ------------------------------------------------------------------
    // Set
    // ------------------------------------------------------------------

    /// Writes `value` everywhere `segments` select below `node`.
    ///
    /// `slot` is the declared type of the place `node` lives in; `Any` for the
    /// root and for dynamic containers. `Done(true)` means at least one value
    /// was written.
    pub fn set(
        &self,
        node: &mut Value,
        slot: &ValueType,
        segments: &[Segment],
        value: &Value,
    ) -> Step<bool> {
        let Some((segment, rest)) = segments.split_first() else {
            if !slot.accepts(value) {
                return Step::Fail(self.not_found(format!(
                    "cannot assign type {} to type {}",
                    value.value_type(),
                    slot
                )));
            }
            *node = value.clone();
            return Step::Done(true);
        };

        if let Value::Reference(r) = node {
            if r.value.is_none() {
                if segment.recursive {
                    return Step::Miss;
                }
                if self.refuses_to_create(segment) {
                    return Step::Fail(self.not_found("path not found"));
                }
                trace!(path = self.source, target = %r.target, "initializing unset reference");
            }
            let inner = r.value.get_or_insert_with(|| Box::new(r.target.zero()));
            return self.set(inner, &r.target, segments, value);
        }

        if matches!(node, Value::Null) {
            if segment.recursive {
                return Step::Miss;
            }
            if self.refuses_to_create(segment) {
                return Step::Fail(self.not_found("path not found"));
            }
            let fresh = match (&segment.selector, slot) {
                (Selector::Keys(_), ValueType::Object(_))
                | (Selector::Indexes(_), ValueType::Array(_)) => slot.zero(),
                (Selector::Keys(_), _) => Value::Object(Object::new()),
                (Selector::Indexes(_), _) => Value::Array(Array::new(Vec::new())),
                (Selector::Wildcard, _) => return Step::Fail(self.not_found("path not found")),
            };
            if !slot.accepts(&fresh) {
                return Step::Fail(self.not_found(format!(
                    "cannot assign type {} to type {}",
                    fresh.value_type(),
                    slot
                )));
            }
            trace!(path = self.source, segment = %segment, "creating missing container");
            *node = fresh;
        }

        match node {
            Value::Object(obj) => self.set_object(obj, segment, segments, rest, value),
            Value::Array(arr) => self.set_array(arr, segment, segments, rest, value),
            Value::Record(rec) => self.set_record(rec, segment, segments, rest, value),
            _ => self.dead_end(segment),
        }
    }

    /// Whether missing structure for `segment` must be reported instead of created.
    fn refuses_to_create(&self, segment: &Segment) -> bool {
        match segment.selector {
            Selector::Keys(_) => self.options.rejects_missing_keys(),
            Selector::Indexes(_) => self.options.rejects_missing_indexes(),
            Selector::Wildcard => true,
        }
    }

    fn set_object(
        &self,
        obj: &mut Object,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
        value: &Value,
    ) -> Step<bool> {
        let keys: Vec<String> = match &segment.selector {
            Selector::Indexes(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access map with an index"));
            }
            Selector::Keys(keys) if !segment.recursive => {
                let keys: Vec<String> = unique(keys).into_iter().cloned().collect();
                if self.options.rejects_missing_keys()
                    && let Some(missing) = keys.iter().find(|k| !obj.entries.contains_key(*k))
                {
                    return Step::Fail(self.not_found(format!("key does not exist ({})", missing)));
                }
                keys
            }
            _ => obj.entries.keys().cloned().collect(),
        };

        let mut written = Fanout::<bool>::default();
        for key in keys {
            let created = !obj.entries.contains_key(&key);
            if created {
                obj.entries.insert(key.clone(), obj.elem.zero());
            }
            let target = segment.is_wildcard() || segment.names_key(&key);
            let Some(child) = obj.entries.get_mut(&key) else {
                continue;
            };

            let mut branch = Fanout::<bool>::default();
            let outcome = self.set_child(
                child,
                &obj.elem,
                segment,
                segments,
                rest,
                target,
                value,
                &mut branch,
            );
            if created && (outcome.is_err() || !branch.acc) {
                obj.entries.shift_remove(&key);
            }
            if let Err(err) = outcome {
                return Step::Fail(err);
            }
            written.extend(branch);
        }
        written.finish(segment)
    }

    fn set_array(
        &self,
        arr: &mut Array,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
        value: &Value,
    ) -> Step<bool> {
        let len = arr.len();
        let positions: Vec<(usize, bool)> = match &segment.selector {
            Selector::Keys(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access array with a key"));
            }
            Selector::Indexes(specs) if !segment.recursive => match resolve(specs, len, false) {
                Ok(positions) => positions.into_iter().map(|i| (i, true)).collect(),
                Err(err) => return Step::Fail(self.not_found(err.to_string())),
            },
            Selector::Indexes(specs) => {
                let hits = matching(specs, len);
                (0..len).map(|i| (i, hits.contains(&i))).collect()
            }
            _ => (0..len).map(|i| (i, segment.is_wildcard())).collect(),
        };

        if let Some(&(last, _)) = positions.last()
            && last >= len
        {
            if self.options.rejects_missing_indexes() {
                let missing = positions
                    .iter()
                    .map(|(i, _)| *i)
                    .find(|i| *i >= len)
                    .unwrap_or(last);
                return Step::Fail(self.not_found(format!("index out of range ({})", missing)));
            }
            if arr.items.try_reserve(last + 1 - len).is_err() {
                return Step::Fail(self.not_found(format!("index out of range ({})", last)));
            }
            trace!(path = self.source, from = len, to = last + 1, "growing array");
            let zero = arr.elem.zero();
            arr.items.resize(last + 1, zero);
        }

        let mut written = Fanout::<bool>::default();
        for (i, target) in positions {
            let child = &mut arr.items[i];
            if let Err(err) =
                self.set_child(child, &arr.elem, segment, segments, rest, target, value, &mut written)
            {
                return Step::Fail(err);
            }
        }
        written.finish(segment)
    }

    fn set_record(
        &self,
        rec: &mut Record,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
        value: &Value,
    ) -> Step<bool> {
        let tag = self.options.field_tag.as_deref();
        let fields: Vec<(usize, bool)> = match &segment.selector {
            Selector::Indexes(_) if !segment.recursive => {
                return Step::Fail(self.not_found("cannot access struct with an index"));
            }
            Selector::Keys(keys) if !segment.recursive => {
                let mut fields = Vec::with_capacity(keys.len());
                for key in unique(keys) {
                    match rec.position(key, tag) {
                        Some(i) => fields.push((i, true)),
                        None => {
                            return Step::Fail(
                                self.not_found(format!("field does not exist ({})", key)),
                            );
                        }
                    }
                }
                fields
            }
            _ => rec
                .fields
                .iter()
                .enumerate()
                .filter_map(|(i, field)| {
                    field
                        .address(tag)
                        .map(|name| (i, segment.is_wildcard() || segment.names_key(name)))
                })
                .collect(),
        };

        let mut written = Fanout::<bool>::default();
        for (i, target) in fields {
            let field = &mut rec.fields[i];
            if let Err(err) = self.set_child(
                &mut field.value,
                &field.ty,
                segment,
                segments,
                rest,
                target,
                value,
                &mut written,
            ) {
                return Step::Fail(err);
            }
        }
        written.finish(segment)
    }

    /// Runs the set branches for one child. A recursive segment first keeps
    /// searching below the child, then writes through it if it is a target, so
    /// a match that contains further matches ends up holding the new value.
    /// A target the rest of the path cannot be written through is skipped.
    #[allow(clippy::too_many_arguments)]
    fn set_child(
        &self,
        child: &mut Value,
        slot: &ValueType,
        segment: &Segment,
        segments: &[Segment],
        rest: &[Segment],
        target: bool,
        value: &Value,
        written: &mut Fanout<bool>,
    ) -> Result<(), PathError> {
        if segment.recursive {
            written.absorb(self.set(child, slot, segments, value))?;
        }
        if !segment.recursive || target {
            written.absorb(self.set(child, slot, rest, value).soften(segment))?;
        }
        Ok(())
    }
}
