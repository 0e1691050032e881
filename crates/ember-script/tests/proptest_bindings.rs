//! Property tests for mirrored accessor semantics.
//!
//! Random sequences of transform operations are applied both through the
//! bindings (against the engine double) and to a plain model struct; the two
//! must agree after every step, whichever accessor performed the write.

mod common;

use std::sync::Arc;

use common::FakeEngine;
use ember_script::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TransformOp {
    SetTranslation(f32, f32, f32),
    SetRotation(f32, f32, f32),
    SetScale(f32, f32, f32),
    /// Drop the accessor and fetch a fresh one.
    Reacquire,
}

/// Finite (non-NaN, non-Inf) f32 values.
fn finite_f32() -> impl Strategy<Value = f32> {
    (-1_000_000i32..1_000_000i32).prop_map(|v| v as f32 * 0.01)
}

fn transform_op_strategy() -> impl Strategy<Value = TransformOp> {
    prop_oneof![
        (finite_f32(), finite_f32(), finite_f32())
            .prop_map(|(x, y, z)| TransformOp::SetTranslation(x, y, z)),
        (finite_f32(), finite_f32(), finite_f32())
            .prop_map(|(x, y, z)| TransformOp::SetRotation(x, y, z)),
        (finite_f32(), finite_f32(), finite_f32())
            .prop_map(|(x, y, z)| TransformOp::SetScale(x, y, z)),
        Just(TransformOp::Reacquire),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn mirrored_transform_matches_model(ops in prop::collection::vec(transform_op_strategy(), 1..40)) {
        let engine = Arc::new(FakeEngine::new());
        let ctx = ScriptContext::new(engine.clone());
        let entity = ctx.entity(engine.spawn());

        let mut accessor = entity.add::<TransformComponent>().unwrap();
        let mut model = (Vec3::ZERO, Vec3::ZERO, Vec3::ONE);

        for op in ops {
            match op {
                TransformOp::SetTranslation(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_translation(v).unwrap();
                    model.0 = v;
                }
                TransformOp::SetRotation(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_rotation(v).unwrap();
                    model.1 = v;
                }
                TransformOp::SetScale(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_scale(v).unwrap();
                    model.2 = v;
                }
                TransformOp::Reacquire => {
                    accessor = entity.get::<TransformComponent>().unwrap();
                }
            }

            // The accessor always reports engine truth, and engine truth is
            // exactly the model: no write lost, no field disturbed.
            prop_assert_eq!(accessor.translation().unwrap(), model.0);
            prop_assert_eq!(accessor.rotation().unwrap(), model.1);
            prop_assert_eq!(accessor.scale().unwrap(), model.2);
        }
    }

    #[test]
    fn detached_transform_matches_model(ops in prop::collection::vec(transform_op_strategy(), 1..40)) {
        let mut accessor = TransformComponent::detached();
        let mut model = (Vec3::ZERO, Vec3::ZERO, Vec3::ONE);

        for op in ops {
            match op {
                TransformOp::SetTranslation(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_translation(v).unwrap();
                    model.0 = v;
                }
                TransformOp::SetRotation(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_rotation(v).unwrap();
                    model.1 = v;
                }
                TransformOp::SetScale(x, y, z) => {
                    let v = Vec3::new(x, y, z);
                    accessor.set_scale(v).unwrap();
                    model.2 = v;
                }
                // A detached accessor is the record; reacquiring means
                // nothing, keep the same one.
                TransformOp::Reacquire => {}
            }

            prop_assert_eq!(accessor.translation().unwrap(), model.0);
            prop_assert_eq!(accessor.rotation().unwrap(), model.1);
            prop_assert_eq!(accessor.scale().unwrap(), model.2);
        }
    }
}
