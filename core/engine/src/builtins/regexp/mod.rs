//! The global `RegExp` object.
//!
//! The `RegExp` object is used for matching text with a pattern.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-regexp-constructor
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/RegExp

mod flags;
pub mod regexp_string_iterator;
#[cfg(test)]
mod tests;

pub use flags::RegExpFlags;

use crate::{
    builtins::{string::get_substitution, Array, BuiltIn},
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyDescriptor},
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsString, JsValue,
};
use regexp_string_iterator::RegExpStringIterator;
use regress::{Flags, Regex};
use std::str::FromStr;

/// The internal representation of a `RegExp` object.
#[derive(Debug, Clone, Finalize)]
pub struct RegExp {
    /// Regex matcher.
    matcher: Regex,
    flags: RegExpFlags,
    original_source: JsString,
    original_flags: JsString,
}

// The compiled program and the sources never hold GC'd objects.
unsafe impl Trace for RegExp {
    empty_trace!();
}

impl BuiltIn for RegExp {
    const NAME: &'static str = "RegExp";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();

        let flag_attributes = Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE;

        let get_global = FunctionBuilder::native(context, Self::get_global)
            .name("get global")
            .build();
        let get_ignore_case = FunctionBuilder::native(context, Self::get_ignore_case)
            .name("get ignoreCase")
            .build();
        let get_multiline = FunctionBuilder::native(context, Self::get_multiline)
            .name("get multiline")
            .build();
        let get_dot_all = FunctionBuilder::native(context, Self::get_dot_all)
            .name("get dotAll")
            .build();
        let get_unicode = FunctionBuilder::native(context, Self::get_unicode)
            .name("get unicode")
            .build();
        let get_sticky = FunctionBuilder::native(context, Self::get_sticky)
            .name("get sticky")
            .build();
        let get_flags = FunctionBuilder::native(context, Self::get_flags)
            .name("get flags")
            .build();
        let get_source = FunctionBuilder::native(context, Self::get_source)
            .name("get source")
            .build();

        // The legacy statics of the constructor live on the realm; every
        // getter checks that the receiver is this very constructor.
        let static_attributes = Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE;
        let get_input = FunctionBuilder::native(context, Self::get_input)
            .name("get input")
            .build();
        let set_input = FunctionBuilder::native(context, Self::set_input)
            .name("set input")
            .length(1)
            .build();
        let get_last_match = FunctionBuilder::native(context, Self::get_last_match)
            .name("get lastMatch")
            .build();
        let get_last_paren = FunctionBuilder::native(context, Self::get_last_paren)
            .name("get lastParen")
            .build();
        let get_left_context = FunctionBuilder::native(context, Self::get_left_context)
            .name("get leftContext")
            .build();
        let get_right_context = FunctionBuilder::native(context, Self::get_right_context)
            .name("get rightContext")
            .build();

        let mut builder = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().regexp().clone(),
        )
        .name(Self::NAME)
        .length(2);

        builder
            .static_accessor(
                WellKnownSymbols::species(),
                Some(get_species),
                None,
                Attribute::CONFIGURABLE,
            )
            .method(Self::exec, "exec", 1)
            .method(Self::test, "test", 1)
            .method(Self::to_string, "toString", 0)
            .method(Self::compile, "compile", 2)
            .method(Self::r#match, WellKnownSymbols::r#match(), 1)
            .method(Self::match_all, WellKnownSymbols::match_all(), 1)
            .method(Self::replace, WellKnownSymbols::replace(), 2)
            .method(Self::search, WellKnownSymbols::search(), 1)
            .method(Self::split, WellKnownSymbols::split(), 2)
            .accessor("global", Some(get_global), None, flag_attributes)
            .accessor("ignoreCase", Some(get_ignore_case), None, flag_attributes)
            .accessor("multiline", Some(get_multiline), None, flag_attributes)
            .accessor("dotAll", Some(get_dot_all), None, flag_attributes)
            .accessor("unicode", Some(get_unicode), None, flag_attributes)
            .accessor("sticky", Some(get_sticky), None, flag_attributes)
            .accessor("flags", Some(get_flags), None, flag_attributes)
            .accessor("source", Some(get_source), None, flag_attributes);

        builder
            .static_accessor(
                "input",
                Some(get_input.clone()),
                Some(set_input.clone()),
                static_attributes,
            )
            .static_accessor("$_", Some(get_input), Some(set_input), static_attributes)
            .static_accessor(
                "lastMatch",
                Some(get_last_match.clone()),
                None,
                static_attributes,
            )
            .static_accessor("$&", Some(get_last_match), None, static_attributes)
            .static_accessor(
                "lastParen",
                Some(get_last_paren.clone()),
                None,
                static_attributes,
            )
            .static_accessor("$+", Some(get_last_paren), None, static_attributes)
            .static_accessor(
                "leftContext",
                Some(get_left_context.clone()),
                None,
                static_attributes,
            )
            .static_accessor("$`", Some(get_left_context), None, static_attributes)
            .static_accessor(
                "rightContext",
                Some(get_right_context.clone()),
                None,
                static_attributes,
            )
            .static_accessor("$'", Some(get_right_context), None, static_attributes);

        for n in 1..=9u32 {
            let getter = FunctionBuilder::closure_with_captures(
                builder.context(),
                |this, _, captures, context| {
                    let n = captures
                        .as_number()
                        .expect("the capture index is always a number")
                        as usize;
                    Self::legacy_static_receiver_check(this, context)?;
                    if !context.realm().legacy_regexp_statics_enabled {
                        return Ok(JsValue::undefined());
                    }
                    Ok(context.realm().regexp_statics.capture(n).into())
                },
                JsValue::new(n),
            )
            .name(format!("get ${n}"))
            .build();
            builder.static_accessor(
                format!("${n}").as_str(),
                Some(getter),
                None,
                static_attributes,
            );
        }

        Some(builder.build().into())
    }
}

impl RegExp {
    /// The flags of this regular expression.
    pub(crate) fn flags(&self) -> RegExpFlags {
        self.flags
    }

    /// Abstract operation `IsRegExp ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isregexp
    pub(crate) fn is_reg_exp(value: &JsValue, context: &mut Context) -> JsResult<bool> {
        // 1. If Type(argument) is not Object, return false.
        let Some(obj) = value.as_object() else {
            return Ok(false);
        };

        // 2. Let matcher be ? Get(argument, @@match).
        let matcher = obj.get(WellKnownSymbols::r#match(), context)?;

        // 3. If matcher is not undefined, return ! ToBoolean(matcher).
        if !matcher.is_undefined() {
            return Ok(matcher.to_boolean());
        }

        // 4-5. Return true if argument has a [[RegExpMatcher]] internal slot.
        Ok(obj.borrow().as_regexp().is_some())
    }

    /// `RegExp ( pattern, flags )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp-pattern-flags
    pub(crate) fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let pattern = args.get_or_undefined(0);
        let flags = args.get_or_undefined(1);

        // 1. Let patternIsRegExp be ? IsRegExp(pattern).
        let pattern_is_regexp = Self::is_reg_exp(pattern, context)?;

        // 2-3. A plain call with a regexp pattern and no flags returns the
        //      pattern unchanged when its constructor is this constructor.
        if new_target.is_undefined() && pattern_is_regexp && flags.is_undefined() {
            let pattern_obj = pattern.as_object().expect("regexps are always objects");
            let pattern_constructor = pattern_obj.get("constructor", context)?;
            let this_constructor = context.intrinsics().constructors().regexp().constructor();
            if matches!(pattern_constructor.as_object(), Some(c) if JsObject::equals(c, &this_constructor))
            {
                return Ok(pattern.clone());
            }
        }

        // 4-6. Resolve (P, F) from the pattern kind.
        let (p, f) = if let Some(pattern_obj) = pattern.as_object() {
            let regexp_data = pattern_obj.borrow().as_regexp().cloned();
            if let Some(regexp) = regexp_data {
                // 4. If pattern is an Object with a [[RegExpMatcher]] slot:
                let p = JsValue::from(regexp.original_source.clone());
                let f = if flags.is_undefined() {
                    JsValue::from(regexp.original_flags.clone())
                } else {
                    flags.clone()
                };
                (p, f)
            } else if pattern_is_regexp {
                // 5. Else if patternIsRegExp is true: read source/flags.
                let p = pattern_obj.get("source", context)?;
                let f = if flags.is_undefined() {
                    pattern_obj.get("flags", context)?
                } else {
                    flags.clone()
                };
                (p, f)
            } else {
                (pattern.clone(), flags.clone())
            }
        } else {
            // 6. Else, let P be pattern and let F be flags.
            (pattern.clone(), flags.clone())
        };

        // 7. Let O be ? RegExpAlloc(newTarget).
        let new_target = if new_target.is_undefined() {
            context
                .intrinsics()
                .constructors()
                .regexp()
                .constructor()
                .into()
        } else {
            new_target.clone()
        };
        let obj = Self::alloc(&new_target, context)?;

        // 8. Return ? RegExpInitialize(O, P, F).
        Self::initialize(obj, &p, &f, context)
    }

    /// Abstract operation `RegExpAlloc ( newTarget )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexpalloc
    fn alloc(new_target: &JsValue, context: &mut Context) -> JsResult<JsObject> {
        // 1. Let obj be ? OrdinaryCreateFromConstructor(newTarget, "%RegExp.prototype%").
        let proto =
            get_prototype_from_constructor(new_target, StandardConstructors::regexp, context)?;
        let obj = JsObject::from_proto_and_data(proto, ObjectData::ordinary());

        // 2. Perform ! DefinePropertyOrThrow(obj, "lastIndex", PropertyDescriptor
        //    { [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: false }).
        obj.define_property_or_throw(
            "lastIndex",
            PropertyDescriptor::builder()
                .writable(true)
                .enumerable(false)
                .configurable(false)
                .build(),
            context,
        )
        .expect("this DefinePropertyOrThrow call must not fail");

        // 3. Return obj.
        Ok(obj)
    }

    /// Abstract operation `RegExpInitialize ( obj, pattern, flags )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexpinitialize
    pub(crate) fn initialize(
        obj: JsObject,
        pattern: &JsValue,
        flags: &JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1-2. Let P be the pattern string.
        let p = if pattern.is_undefined() {
            js_string!()
        } else {
            pattern.to_string(context)?
        };

        // 3-4. Let F be the flags string.
        let f = if flags.is_undefined() {
            js_string!()
        } else {
            flags.to_string(context)?
        };

        // 5. If F contains a code unit other than "g", "i", "m", "s", "u",
        //    or "y", or repeats one, throw a SyntaxError exception.
        let parsed_flags = match RegExpFlags::from_str(&f.to_std_string_escaped()) {
            Err(msg) => return Err(JsNativeError::syntax().with_message(msg).into()),
            Ok(result) => result,
        };

        // 10-20. Parse and compile the pattern; duplicate named groups are a
        //        SyntaxError surfaced by the compiler.
        let matcher = match Regex::with_flags(
            &p.to_std_string_escaped(),
            Flags::from(parsed_flags.to_flag_string().as_str()),
        ) {
            Err(error) => {
                return Err(JsNativeError::syntax()
                    .with_message(format!("failed to create matcher: {}", error.text))
                    .into());
            }
            Ok(val) => val,
        };

        let regexp = Self {
            matcher,
            flags: parsed_flags,
            original_source: p,
            original_flags: f,
        };

        *obj.borrow_mut().kind_mut() = ObjectData::reg_exp(Box::new(regexp));

        // 21. Perform ? Set(obj, "lastIndex", +0𝔽, true).
        obj.set("lastIndex", 0, true, context)?;

        // 22. Return obj.
        Ok(obj.into())
    }

    /// Abstract operation `RegExpCreate ( P, F )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexpcreate
    pub(crate) fn create(p: &JsValue, f: &JsValue, context: &mut Context) -> JsResult<JsObject> {
        // 1. Let obj be ? RegExpAlloc(%RegExp%).
        let constructor = context.intrinsics().constructors().regexp().constructor();
        let obj = Self::alloc(&constructor.into(), context)?;

        // 2. Return ? RegExpInitialize(obj, P, F).
        let value = Self::initialize(obj, p, f, context)?;
        Ok(value
            .as_object()
            .cloned()
            .expect("RegExpInitialize always returns the object"))
    }

    /// `get RegExp [ @@species ]`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-regexp-@@species
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// Shared implementation of the flag accessors.
    fn regexp_has_flag(this: &JsValue, flag: RegExpFlags, context: &mut Context) -> JsResult<JsValue> {
        if let Some(object) = this.as_object() {
            if let Some(regexp) = object.borrow().as_regexp() {
                return Ok(regexp.flags.contains(flag).into());
            }

            // Accessing the flag on %RegExp.prototype% itself returns
            // undefined.
            if JsObject::equals(
                object,
                &context.intrinsics().constructors().regexp().prototype(),
            ) {
                return Ok(JsValue::undefined());
            }
        }

        Err(JsNativeError::typ()
            .with_message("flag accessor requires a RegExp receiver")
            .into())
    }

    /// `get RegExp.prototype.global`
    fn get_global(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::GLOBAL, context)
    }

    /// `get RegExp.prototype.ignoreCase`
    fn get_ignore_case(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::IGNORE_CASE, context)
    }

    /// `get RegExp.prototype.multiline`
    fn get_multiline(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::MULTILINE, context)
    }

    /// `get RegExp.prototype.dotAll`
    fn get_dot_all(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::DOT_ALL, context)
    }

    /// `get RegExp.prototype.unicode`
    fn get_unicode(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::UNICODE, context)
    }

    /// `get RegExp.prototype.sticky`
    fn get_sticky(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::regexp_has_flag(this, RegExpFlags::STICKY, context)
    }

    /// `get RegExp.prototype.flags`
    ///
    /// The flags are assembled in the canonical `gimsuy` order.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-regexp.prototype.flags
    fn get_flags(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let R be the this value.
        // 2. If Type(R) is not Object, throw a TypeError exception.
        let Some(object) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype.flags getter requires an object receiver")
                .into());
        };

        // 3-19. Concatenate the individual flag results.
        let mut result = std::string::String::with_capacity(6);
        if object.get("global", context)?.to_boolean() {
            result.push('g');
        }
        if object.get("ignoreCase", context)?.to_boolean() {
            result.push('i');
        }
        if object.get("multiline", context)?.to_boolean() {
            result.push('m');
        }
        if object.get("dotAll", context)?.to_boolean() {
            result.push('s');
        }
        if object.get("unicode", context)?.to_boolean() {
            result.push('u');
        }
        if object.get("sticky", context)?.to_boolean() {
            result.push('y');
        }

        Ok(js_string!(result).into())
    }

    /// `get RegExp.prototype.source`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-regexp.prototype.source
    fn get_source(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(object) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype.source getter requires an object receiver")
                .into());
        };

        let regexp = object.borrow().as_regexp().cloned();
        match regexp {
            Some(regexp) => {
                // 5. Return EscapeRegExpPattern(src, flags).
                if regexp.original_source.is_empty() {
                    return Ok(js_string!("(?:)").into());
                }
                // Escape the characters that would terminate the literal.
                let escaped = regexp
                    .original_source
                    .to_std_string_escaped()
                    .replace('\\', "\\\\")
                    .replace('/', "\\/")
                    .replace('\n', "\\n")
                    .replace('\r', "\\r")
                    .replace('\u{2028}', "\\u2028")
                    .replace('\u{2029}', "\\u2029");
                Ok(js_string!(escaped).into())
            }
            None => {
                if JsObject::equals(
                    object,
                    &context.intrinsics().constructors().regexp().prototype(),
                ) {
                    Ok(js_string!("(?:)").into())
                } else {
                    Err(JsNativeError::typ()
                        .with_message("RegExp.prototype.source getter requires a RegExp receiver")
                        .into())
                }
            }
        }
    }

    /// Abstract operation `RegExpExec ( R, S )`: calls a user-provided
    /// `exec`, falling back to the built-in matcher.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexpexec
    pub(crate) fn abstract_exec(
        this: &JsObject,
        input: JsString,
        context: &mut Context,
    ) -> JsResult<Option<JsObject>> {
        // 1. Let exec be ? Get(R, "exec").
        let exec = this.get("exec", context)?;

        // 2. If IsCallable(exec) is true, then
        if let Some(exec) = exec.as_callable() {
            // a. Let result be ? Call(exec, R, « S »).
            let result = exec.call(&this.clone().into(), &[input.into()], context)?;

            // b. If Type(result) is neither Object nor Null, throw a TypeError exception.
            return match result {
                JsValue::Object(result) => Ok(Some(result)),
                JsValue::Null => Ok(None),
                _ => Err(JsNativeError::typ()
                    .with_message("regexp exec returned neither object nor null")
                    .into()),
            };
        }

        // 3. Perform ? RequireInternalSlot(R, [[RegExpMatcher]]).
        if this.borrow().as_regexp().is_none() {
            return Err(JsNativeError::typ()
                .with_message("RegExpExec called with invalid value")
                .into());
        }

        // 4. Return ? RegExpBuiltinExec(R, S).
        Self::abstract_builtin_exec(this, &input, context)
    }

    /// Abstract operation `RegExpBuiltinExec ( R, S )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexpbuiltinexec
    pub(crate) fn abstract_builtin_exec(
        this: &JsObject,
        input: &JsString,
        context: &mut Context,
    ) -> JsResult<Option<JsObject>> {
        let rx = {
            let obj = this.borrow();
            let Some(rx) = obj.as_regexp() else {
                return Err(JsNativeError::typ()
                    .with_message("RegExpBuiltinExec called with invalid value")
                    .into());
            };
            rx.clone()
        };

        // 1. Let length be the length of S.
        let length = input.len() as u64;

        // 2. Let lastIndex be ℝ(? ToLength(? Get(R, "lastIndex"))).
        let mut last_index = this.get("lastIndex", context)?.to_length(context)?;

        // 3-6. Read the flags.
        let global = rx.flags.contains(RegExpFlags::GLOBAL);
        let sticky = rx.flags.contains(RegExpFlags::STICKY);
        let full_unicode = rx.flags.contains(RegExpFlags::UNICODE);

        // 7. If global is false and sticky is false, set lastIndex to 0.
        if !global && !sticky {
            last_index = 0;
        }

        // 8. Let matcher be R.[[RegExpMatcher]].
        let matcher = &rx.matcher;

        // 10-13. Hunt for a match from lastIndex.
        let lossy_input = input.to_std_string_escaped();
        let (match_value, last_byte_index) = loop {
            // a. If lastIndex > length, then fail.
            if last_index > length {
                if global || sticky {
                    this.set("lastIndex", 0, true, context)?;
                }
                return Ok(None);
            }

            // b. Let inputIndex be the byte index matching lastIndex.
            let last_byte_index = String::from_utf16_lossy(&input[..last_index as usize]).len();

            // c. Let r be matcher(input, inputIndex).
            let r = matcher.find_from(&lossy_input, last_byte_index).next();

            match r {
                // d. If r is failure, then
                None => {
                    if sticky {
                        this.set("lastIndex", 0, true, context)?;
                        return Ok(None);
                    }
                    last_index = advance_string_index(input, last_index, full_unicode);
                }
                Some(m) => {
                    if m.start() != last_byte_index {
                        if sticky {
                            // A sticky match must start exactly at lastIndex.
                            this.set("lastIndex", 0, true, context)?;
                            return Ok(None);
                        }
                        last_index = advance_string_index(input, last_index, full_unicode);
                    } else {
                        break (m, last_byte_index);
                    }
                }
            }
        };

        // 14. Let e be r's endIndex value, in code units.
        let e_bytes = match_value.end();
        let e = lossy_input[..e_bytes].encode_utf16().count();

        // 15-16. If global or sticky, set lastIndex to e.
        if global || sticky {
            this.set("lastIndex", e, true, context)?;
        }

        // 17-21. Let A be ! ArrayCreate(n + 1).
        let n = match_value.captures.len() as u64;
        let a = Array::array_create(n + 1, None, context)?;

        // 22. Perform ! CreateDataPropertyOrThrow(A, "index", 𝔽(lastIndex)).
        a.create_data_property_or_throw("index", last_index, context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 23. Perform ! CreateDataPropertyOrThrow(A, "input", S).
        a.create_data_property_or_throw("input", input.clone(), context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 28-29. Let matchedSubstr be GetMatchString(S, match).
        let matched_substr = js_string!(&lossy_input[last_byte_index..e_bytes]);
        a.create_data_property_or_throw(0, matched_substr.clone(), context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 30-31. Build the groups object from the named captures.
        let mut named_groups = match_value
            .named_groups()
            .collect::<Vec<(&str, Option<std::ops::Range<usize>>)>>();
        named_groups.sort_by(|(name_x, _), (name_y, _)| name_x.cmp(name_y));

        let groups = if named_groups.is_empty() {
            JsValue::undefined()
        } else {
            // a. Let groups be OrdinaryObjectCreate(null).
            let groups = JsObject::with_null_proto();
            for (name, range) in named_groups {
                let value = match &range {
                    Some(range) => js_string!(&lossy_input[range.clone()]).into(),
                    None => JsValue::undefined(),
                };
                groups
                    .create_data_property_or_throw(name, value, context)
                    .expect("this CreateDataPropertyOrThrow call must not fail");
            }
            groups.into()
        };

        // 32. Perform ! CreateDataPropertyOrThrow(A, "groups", groups).
        a.create_data_property_or_throw("groups", groups, context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 33. For each integer i such that 1 ≤ i ≤ n, add the capture.
        let mut capture_strings = Vec::with_capacity(n as usize);
        for (i, capture) in match_value.captures.iter().enumerate() {
            let captured_value = match capture {
                Some(range) => js_string!(&lossy_input[range.clone()]).into(),
                None => JsValue::undefined(),
            };
            if let JsValue::String(s) = &captured_value {
                capture_strings.push(s.clone());
            } else {
                capture_strings.push(js_string!());
            }
            a.create_data_property_or_throw(i + 1, captured_value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        // The legacy statics of the constructor update on every successful
        // built-in exec.
        let start_units = lossy_input[..last_byte_index].encode_utf16().count();
        context.realm_mut().regexp_statics.update(
            input.clone(),
            start_units,
            e,
            capture_strings,
        );

        // 34. Return A.
        Ok(Some(a))
    }

    /// `RegExp.prototype.exec ( string )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype.exec
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/RegExp/exec
    pub(crate) fn exec(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let R be the this value; it must be a RegExp object.
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_regexp().is_some())
            .cloned()
            .ok_or_else(|| {
                JsNativeError::typ().with_message("RegExp.prototype.exec called with invalid value")
            })?;

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Return ? RegExpBuiltinExec(R, S).
        Ok(Self::abstract_builtin_exec(&obj, &s, context)?
            .map_or(JsValue::null(), JsValue::from))
    }

    /// `RegExp.prototype.test ( S )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype.test
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/RegExp/test
    pub(crate) fn test(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let R be the this value; it must be an Object.
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype.test requires an object receiver")
                .into());
        };

        // 3. Let string be ? ToString(S).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Let match be ? RegExpExec(R, string).
        let m = Self::abstract_exec(obj, s, context)?;

        // 5. If match is not null, return true; else return false.
        Ok(m.is_some().into())
    }

    /// `RegExp.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/RegExp/toString
    fn to_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let R be the this value; it must be an Object.
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype.toString requires an object receiver")
                .into());
        };

        // 3. Let pattern be ? ToString(? Get(R, "source")).
        let pattern = obj.get("source", context)?.to_string(context)?;
        // 4. Let flags be ? ToString(? Get(R, "flags")).
        let flags = obj.get("flags", context)?.to_string(context)?;

        // 5. Return "/" + pattern + "/" + flags.
        Ok(js_string!(js_string!("/"), pattern, js_string!("/"), flags).into())
    }

    /// `RegExp.prototype.compile ( pattern, flags )`
    ///
    /// Reinitializes the receiver in place and resets `lastIndex` with an
    /// observable `[[Set]]`, so a non-writable `lastIndex` makes the call
    /// throw.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype.compile
    fn compile(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let O be the this value; it must be a RegExp object.
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_regexp().is_some())
            .cloned()
            .ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("RegExp.prototype.compile called with invalid value")
            })?;

        let pattern = args.get_or_undefined(0);
        let flags = args.get_or_undefined(1);

        // 3. If pattern is an Object with a [[RegExpMatcher]] internal slot, then
        let pattern_regexp = pattern
            .as_object()
            .and_then(|o| o.borrow().as_regexp().cloned());
        let (p, f) = if let Some(pattern_regexp) = pattern_regexp {
            // a. If flags is not undefined, throw a TypeError exception.
            if !flags.is_undefined() {
                return Err(JsNativeError::typ()
                    .with_message("cannot supply flags when compiling from a RegExp")
                    .into());
            }
            (
                JsValue::from(pattern_regexp.original_source.clone()),
                JsValue::from(pattern_regexp.original_flags.clone()),
            )
        } else {
            // 4. Else: let P be pattern and let F be flags.
            (pattern.clone(), flags.clone())
        };

        // 5. Return ? RegExpInitialize(O, P, F).
        Self::initialize(obj, &p, &f, context)
    }

    /// `RegExp.prototype [ @@match ] ( string )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype-@@match
    fn r#match(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let rx be the this value; it must be an Object.
        let Some(rx) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype[@@match] requires an object receiver")
                .into());
        };

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Let flags be ? ToString(? Get(rx, "flags")).
        let flags = rx.get("flags", context)?.to_string(context)?;

        // 5. If flags does not contain "g", then
        if !flags.contains(&u16::from(b'g')) {
            // a. Return ? RegExpExec(rx, S).
            return Ok(Self::abstract_exec(&rx, s, context)?
                .map_or(JsValue::null(), JsValue::from));
        }

        // 6. Else,
        // b. Perform ? Set(rx, "lastIndex", +0𝔽, true).
        let full_unicode = flags.contains(&u16::from(b'u'));
        rx.set("lastIndex", 0, true, context)?;

        // c-e. Drain the matches.
        let a = Array::array_create(0, None, context)?;
        let mut n: u32 = 0;
        loop {
            // i. Let result be ? RegExpExec(rx, S).
            let Some(result) = Self::abstract_exec(&rx, s.clone(), context)? else {
                // ii. If result is null: return null or A.
                return if n == 0 {
                    Ok(JsValue::null())
                } else {
                    Ok(a.into())
                };
            };

            // iii. Else:
            // 1. Let matchStr be ? ToString(? Get(result, "0")).
            let match_str = result.get(0, context)?.to_string(context)?;

            // 2. Perform ! CreateDataPropertyOrThrow(A, ! ToString(𝔽(n)), matchStr).
            a.create_data_property_or_throw(n, match_str.clone(), context)
                .expect("this CreateDataPropertyOrThrow call must not fail");

            // 3. If matchStr is the empty String, advance lastIndex.
            if match_str.is_empty() {
                let this_index = rx.get("lastIndex", context)?.to_length(context)?;
                let next_index = advance_string_index(&s, this_index, full_unicode);
                rx.set("lastIndex", next_index, true, context)?;
            }

            // 4. Set n to n + 1.
            n += 1;
        }
    }

    /// `RegExp.prototype [ @@matchAll ] ( string )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp-prototype-matchall
    fn match_all(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let R be the this value; it must be an Object.
        let Some(rx) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype[@@matchAll] requires an object receiver")
                .into());
        };

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Let C be ? SpeciesConstructor(R, %RegExp%).
        let c = rx.species_constructor(StandardConstructors::regexp, context)?;

        // 5. Let flags be ? ToString(? Get(R, "flags")).
        let flags = rx.get("flags", context)?.to_string(context)?;

        // 6. Let matcher be ? Construct(C, « R, flags »).
        let matcher = c.construct(&[rx.clone().into(), flags.clone().into()], Some(&c), context)?;

        // 7-8. Thread lastIndex through.
        let last_index = rx.get("lastIndex", context)?.to_length(context)?;
        matcher.set("lastIndex", last_index, true, context)?;

        // 9-12. Read the iteration flags.
        let global = flags.contains(&u16::from(b'g'));
        let full_unicode = flags.contains(&u16::from(b'u'));

        // 13. Return CreateRegExpStringIterator(matcher, S, global, fullUnicode).
        Ok(RegExpStringIterator::create_regexp_string_iterator(
            matcher,
            s,
            global,
            full_unicode,
            context,
        ))
    }

    /// `RegExp.prototype [ @@replace ] ( string, replaceValue )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype-@@replace
    fn replace(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let rx be the this value; it must be an Object.
        let Some(rx) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype[@@replace] requires an object receiver")
                .into());
        };

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;
        let length_s = s.len();
        let replace_value = args.get_or_undefined(1);

        // 4-6. Resolve the replacement kind.
        let functional_replace = replace_value.as_callable().cloned();
        let replace_template = match &functional_replace {
            Some(_) => None,
            None => Some(replace_value.to_string(context)?),
        };

        // 7. Let flags be ? ToString(? Get(rx, "flags")).
        let flags = rx.get("flags", context)?.to_string(context)?;

        // 8-9. If global, set lastIndex to 0.
        let global = flags.contains(&u16::from(b'g'));
        let full_unicode = flags.contains(&u16::from(b'u'));
        if global {
            rx.set("lastIndex", 0, true, context)?;
        }

        // 10-12. Collect the match results.
        let mut results = Vec::new();
        loop {
            // a. Let result be ? RegExpExec(rx, S).
            let Some(result) = Self::abstract_exec(&rx, s.clone(), context)? else {
                break;
            };
            results.push(result.clone());

            // c.iii. If global is false, break.
            if !global {
                break;
            }

            // c.iii.3. If matchStr is the empty String, advance lastIndex.
            let match_str = result.get(0, context)?.to_string(context)?;
            if match_str.is_empty() {
                let this_index = rx.get("lastIndex", context)?.to_length(context)?;
                let next_index = advance_string_index(&s, this_index, full_unicode);
                rx.set("lastIndex", next_index, true, context)?;
            }
        }

        // 13-14. Stitch the replacement result.
        let mut accumulated_result: Vec<u16> = Vec::new();
        let mut next_source_position = 0usize;

        for result in results {
            // a-c. Let position be the clamped index of the match.
            let result_length = result.length_of_array_like(context)? as i64;
            let n_captures = std::cmp::max(result_length - 1, 0) as usize;

            let matched = result.get(0, context)?.to_string(context)?;
            let position = result
                .get("index", context)?
                .to_integer_or_infinity(context)?
                .clamp_finite(0, length_s as i64) as usize;

            // f. Let captures be the list of the capture values.
            let mut captures = Vec::with_capacity(n_captures);
            for n in 1..=n_captures {
                let capture = result.get(n, context)?;
                captures.push(if capture.is_undefined() {
                    JsValue::undefined()
                } else {
                    capture.to_string(context)?.into()
                });
            }

            // g. Let namedCaptures be ? Get(result, "groups").
            let named_captures = result.get("groups", context)?;

            // h-j. Compute the replacement string.
            let replacement = if let Some(replace_fn) = &functional_replace {
                let mut replacer_args: Vec<JsValue> = vec![matched.clone().into()];
                replacer_args.extend(captures.clone());
                replacer_args.push(position.into());
                replacer_args.push(s.clone().into());
                if !named_captures.is_undefined() {
                    replacer_args.push(named_captures.clone());
                }
                replace_fn
                    .call(&JsValue::undefined(), &replacer_args, context)?
                    .to_string(context)?
            } else {
                get_substitution(
                    &matched,
                    &s,
                    position,
                    &captures,
                    &named_captures,
                    replace_template
                        .as_ref()
                        .expect("the non-functional path always has a template"),
                    context,
                )?
            };

            // k. If position ≥ nextSourcePosition, append the segment.
            if position >= next_source_position {
                accumulated_result.extend_from_slice(&s[next_source_position..position]);
                accumulated_result.extend_from_slice(&replacement);
                next_source_position = position + matched.len();
            }
        }

        // 15. If nextSourcePosition ≥ lengthS, return accumulatedResult.
        if next_source_position < length_s {
            accumulated_result.extend_from_slice(&s[next_source_position..]);
        }

        Ok(JsString::from(accumulated_result).into())
    }

    /// `RegExp.prototype [ @@search ] ( string )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype-@@search
    fn search(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let rx be the this value; it must be an Object.
        let Some(rx) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype[@@search] requires an object receiver")
                .into());
        };

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Let previousLastIndex be ? Get(rx, "lastIndex").
        let previous_last_index = rx.get("lastIndex", context)?;

        // 5. If SameValue(previousLastIndex, +0𝔽) is false, set it to 0.
        if !JsValue::same_value(&previous_last_index, &JsValue::new(0)) {
            rx.set("lastIndex", 0, true, context)?;
        }

        // 6. Let result be ? RegExpExec(rx, S).
        let result = Self::abstract_exec(&rx, s, context)?;

        // 7-8. Restore lastIndex when it changed.
        let current_last_index = rx.get("lastIndex", context)?;
        if !JsValue::same_value(&current_last_index, &previous_last_index) {
            rx.set("lastIndex", previous_last_index, true, context)?;
        }

        // 9-10. Return the index of the result, or -1𝔽.
        match result {
            Some(result) => result.get("index", context),
            None => Ok((-1).into()),
        }
    }

    /// `RegExp.prototype [ @@split ] ( string, limit )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-regexp.prototype-@@split
    fn split(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let rx be the this value; it must be an Object.
        let Some(rx) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("RegExp.prototype[@@split] requires an object receiver")
                .into());
        };

        // 3. Let S be ? ToString(string).
        let s = args.get_or_undefined(0).to_string(context)?;

        // 4. Let C be ? SpeciesConstructor(rx, %RegExp%).
        let constructor = rx.species_constructor(StandardConstructors::regexp, context)?;

        // 5-10. Clone the receiver with the sticky flag forced.
        let flags = rx.get("flags", context)?.to_string(context)?;
        let unicode_matching = flags.contains(&u16::from(b'u'));
        let new_flags = if flags.contains(&u16::from(b'y')) {
            flags.clone()
        } else {
            js_string!(flags, js_string!("y"))
        };
        let splitter = constructor.construct(
            &[rx.clone().into(), new_flags.into()],
            Some(&constructor),
            context,
        )?;

        // 11. Let A be ! ArrayCreate(0).
        let a = Array::array_create(0, None, context)?;
        let mut length_a: u32 = 0;

        // 13-14. Resolve lim, defaulting to 2^32 - 1.
        let limit = args.get_or_undefined(1);
        let lim = if limit.is_undefined() {
            u32::MAX
        } else {
            limit.to_u32(context)?
        };

        // 15. If lim = 0, return A.
        if lim == 0 {
            return Ok(a.into());
        }

        // 16-17. If S is empty: a single match means an empty result.
        let size = s.len();
        if size == 0 {
            let z = Self::abstract_exec(&splitter, s.clone(), context)?;
            if z.is_some() {
                return Ok(a.into());
            }
            a.create_data_property_or_throw(0, s, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            return Ok(a.into());
        }

        // 18-19. Walk the separator matches.
        let mut p = 0usize;
        let mut q = p;
        while q < size {
            // a-b. Try a match at q.
            splitter.set("lastIndex", q, true, context)?;
            let z = Self::abstract_exec(&splitter, s.clone(), context)?;

            let Some(z) = z else {
                // c. If z is null, advance q.
                q = advance_string_index(&s, q as u64, unicode_matching) as usize;
                continue;
            };

            // d.i. Let e be min(ℝ(? ToLength(? Get(splitter, "lastIndex"))), size).
            let e = splitter
                .get("lastIndex", context)?
                .to_length(context)?
                .min(size as u64) as usize;

            // d.ii. If e = p, advance q: the match was empty.
            if e == p {
                q = advance_string_index(&s, q as u64, unicode_matching) as usize;
                continue;
            }

            // d.iii. Emit the segment before the separator.
            a.create_data_property_or_throw(length_a, s.substring(p, q), context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            length_a += 1;
            if length_a == lim {
                return Ok(a.into());
            }

            // d.iii.6-7. Emit the captures inline.
            p = e;
            let number_of_captures = z.length_of_array_like(context)? as i64;
            let number_of_captures = std::cmp::max(number_of_captures - 1, 0) as u64;
            for i in 1..=number_of_captures {
                let next_capture = z.get(i, context)?;
                a.create_data_property_or_throw(length_a, next_capture, context)
                    .expect("this CreateDataPropertyOrThrow call must not fail");
                length_a += 1;
                if length_a == lim {
                    return Ok(a.into());
                }
            }

            // d.iii.8. Set q to p.
            q = p;
        }

        // 20-22. Emit the trailing segment.
        a.create_data_property_or_throw(length_a, s.substring(p, size), context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 23. Return A.
        Ok(a.into())
    }

    // ==== Legacy statics ====

    /// Validates that the receiver of a legacy static accessor is the
    /// `RegExp` constructor itself.
    fn legacy_static_receiver_check(this: &JsValue, context: &mut Context) -> JsResult<()> {
        let constructor = context.intrinsics().constructors().regexp().constructor();
        match this.as_object() {
            Some(obj) if JsObject::equals(obj, &constructor) => Ok(()),
            _ => Err(JsNativeError::typ()
                .with_message("RegExp legacy static accessors require the RegExp constructor")
                .into()),
        }
    }

    /// `get RegExp.input` / `get RegExp.$_`
    fn get_input(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        if !context.realm().legacy_regexp_statics_enabled {
            return Ok(JsValue::undefined());
        }
        Ok(context.realm().regexp_statics.input.clone().into())
    }

    /// `set RegExp.input` / `set RegExp.$_`
    fn set_input(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        let value = args.get_or_undefined(0).to_string(context)?;
        context.realm_mut().regexp_statics.input = value;
        Ok(JsValue::undefined())
    }

    /// `get RegExp.lastMatch` / `get RegExp.$&`
    fn get_last_match(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        if !context.realm().legacy_regexp_statics_enabled {
            return Ok(JsValue::undefined());
        }
        Ok(context.realm().regexp_statics.last_match.clone().into())
    }

    /// `get RegExp.lastParen` / `get RegExp.$+`
    fn get_last_paren(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        if !context.realm().legacy_regexp_statics_enabled {
            return Ok(JsValue::undefined());
        }
        Ok(context.realm().regexp_statics.last_paren.clone().into())
    }

    /// `get RegExp.leftContext` / `` get RegExp.$` ``
    fn get_left_context(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        if !context.realm().legacy_regexp_statics_enabled {
            return Ok(JsValue::undefined());
        }
        Ok(context.realm().regexp_statics.left_context.clone().into())
    }

    /// `get RegExp.rightContext` / `get RegExp.$'`
    fn get_right_context(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::legacy_static_receiver_check(this, context)?;
        if !context.realm().legacy_regexp_statics_enabled {
            return Ok(JsValue::undefined());
        }
        Ok(context.realm().regexp_statics.right_context.clone().into())
    }
}

/// Abstract operation `AdvanceStringIndex ( S, index, unicode )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-advancestringindex
pub(crate) fn advance_string_index(s: &JsString, index: u64, unicode: bool) -> u64 {
    // 1. Assert: index ≤ 2^53 - 1.
    // 2. If unicode is false, return index + 1.
    if !unicode {
        return index + 1;
    }

    // 3. Let length be the number of code units in S.
    let length = s.len() as u64;

    // 4. If index + 1 ≥ length, return index + 1.
    if index + 1 >= length {
        return index + 1;
    }

    // 5. Let cp be ! CodePointAt(S, index).
    let code_point = s
        .code_point_at(index as usize)
        .expect("the index was checked to be in bounds");

    // 6. Return index + cp.[[CodeUnitCount]].
    index + code_point.code_unit_count() as u64
}
