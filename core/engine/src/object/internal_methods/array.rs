//! The `[[DefineOwnProperty]]` internal method of array exotic objects.

use super::{ordinary_define_own_property, ordinary_get_own_property};
use crate::{
    error::JsNativeError,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    Context, JsResult,
};

/// Internal method `[[DefineOwnProperty]] ( P, Desc )` of array exotic
/// objects.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc
pub(crate) fn array_exotic_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    match key {
        // 2. If P is "length", then a. Return ? ArraySetLength(A, Desc).
        PropertyKey::String(string) if string == "length" => {
            array_set_length(obj, desc, context)
        }
        // 3. Else if P is an array index, then
        PropertyKey::Index(index) if *index < u32::MAX => {
            let index = *index;

            // a. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
            // b. Assert: ! IsDataDescriptor(oldLenDesc) is true.
            // c. Assert: oldLenDesc.[[Configurable]] is false.
            let old_len_desc = ordinary_get_own_property(obj, &"length".into())
                .expect("arrays must have a length property");

            // d. Let oldLen be oldLenDesc.[[Value]].
            let old_len = old_len_desc
                .expect_value()
                .as_number()
                .expect("array length must be a number") as u32;

            // e. If index ≥ oldLen and oldLenDesc.[[Writable]] is false, return false.
            if index >= old_len && !old_len_desc.expect_writable() {
                return Ok(false);
            }

            // f. Let succeeded be ! OrdinaryDefineOwnProperty(A, P, Desc).
            // g. If succeeded is false, return false.
            if !ordinary_define_own_property(obj, key, desc, context)? {
                return Ok(false);
            }

            // h. If index ≥ oldLen, then
            if index >= old_len {
                // i. Set oldLenDesc.[[Value]] to index + 1𝔽.
                // ii. Set succeeded to ! OrdinaryDefineOwnProperty(A, "length", oldLenDesc).
                let mut new_len_desc = old_len_desc;
                new_len_desc.fill_with(
                    &PropertyDescriptor::builder()
                        .value(u64::from(index) + 1)
                        .build(),
                );
                let succeeded =
                    ordinary_define_own_property(obj, &"length".into(), new_len_desc, context)?;
                // iii. Assert: succeeded is true.
                debug_assert!(succeeded);
            }

            // i. Return true.
            Ok(true)
        }
        // 4. Return ? OrdinaryDefineOwnProperty(A, P, Desc).
        _ => ordinary_define_own_property(obj, key, desc, context),
    }
}

/// Abstract operation `ArraySetLength ( A, Desc )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-arraysetlength
fn array_set_length(
    obj: &JsObject,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If Desc.[[Value]] is absent, then
    let Some(new_len_value) = desc.value().cloned() else {
        // a. Return OrdinaryDefineOwnProperty(A, "length", Desc).
        return ordinary_define_own_property(obj, &"length".into(), desc, context);
    };

    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    let new_len = new_len_value.to_u32(context)?;

    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    let number_len = new_len_value.to_number(context)?;

    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError exception.
    if f64::from(new_len) != number_len {
        return Err(JsNativeError::range()
            .with_message("invalid array length")
            .into());
    }

    // 2 & 6. Let newLenDesc be a copy of Desc with [[Value]] set to newLen.
    let mut new_len_desc = PropertyDescriptor::builder()
        .value(new_len)
        .maybe_writable(desc.writable())
        .maybe_enumerable(desc.enumerable())
        .maybe_configurable(desc.configurable())
        .build();

    // 7. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
    let old_len_desc = ordinary_get_own_property(obj, &"length".into())
        .expect("arrays must have a length property");

    // 9. Let oldLen be oldLenDesc.[[Value]].
    let old_len = old_len_desc
        .expect_value()
        .as_number()
        .expect("array length must be a number") as u32;

    // 10. If newLen ≥ oldLen, then a. Return OrdinaryDefineOwnProperty(A, "length", newLenDesc).
    if new_len >= old_len {
        return ordinary_define_own_property(obj, &"length".into(), new_len_desc, context);
    }

    // 11. If oldLenDesc.[[Writable]] is false, return false.
    if !old_len_desc.expect_writable() {
        return Ok(false);
    }

    // 12-13. Let newWritable be true unless newLenDesc.[[Writable]] is false;
    //        defer making the length non-writable until the deletions ran.
    let new_writable = new_len_desc.writable().unwrap_or(true);
    if !new_writable {
        new_len_desc.fill_with(&PropertyDescriptor::builder().writable(true).build());
    }

    // 14. Let succeeded be ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
    // 15. If succeeded is false, return false.
    if !ordinary_define_own_property(obj, &"length".into(), new_len_desc.clone(), context)? {
        return Ok(false);
    }

    // 16. For each own property key P of A that is an array index, whose
    //     numeric value is greater than or equal to newLen, in descending
    //     numeric index order, do
    let indices: Vec<u32> = {
        let object = obj.borrow();
        object
            .properties()
            .index_property_keys()
            .filter(|index| *index >= new_len && *index < u32::MAX)
            .collect()
    };

    for index in indices.into_iter().rev() {
        // a. Let deleteSucceeded be ! A.[[Delete]](P).
        let delete_succeeded = super::ordinary_delete(obj, &PropertyKey::Index(index));

        // b. If deleteSucceeded is false, then
        if !delete_succeeded {
            // i. Set newLenDesc.[[Value]] to ! ToUint32(P) + 1𝔽.
            new_len_desc.fill_with(
                &PropertyDescriptor::builder()
                    .value(u64::from(index) + 1)
                    .build(),
            );

            // ii. If newWritable is false, set newLenDesc.[[Writable]] to false.
            if !new_writable {
                new_len_desc.fill_with(&PropertyDescriptor::builder().writable(false).build());
            }

            // iii. Perform ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
            ordinary_define_own_property(obj, &"length".into(), new_len_desc, context)?;

            // iv. Return false.
            return Ok(false);
        }
    }

    // 17. If newWritable is false, then set the length to non-writable.
    if !new_writable {
        let succeeded = ordinary_define_own_property(
            obj,
            &"length".into(),
            PropertyDescriptor::builder().writable(false).build(),
            context,
        )?;
        debug_assert!(succeeded);
    }

    // 18. Return true.
    Ok(true)
}
