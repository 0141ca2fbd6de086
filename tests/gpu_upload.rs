// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
#![cfg(all(feature = "backend_wgpu", not(target_arch = "wasm32")))]

use cbuffer_settings::annotation::Annotation;
use cbuffer_settings::gpu::ConstantBuffer;
use cbuffer_settings::layout::ConstantBufferLayout;
use cbuffer_settings::schema::{FieldDef, GroupDef, Member, SettingsSchema};
use cbuffer_settings::store::ValueStore;
use cbuffer_settings::value::{Literal, Value};
use std::panic::{AssertUnwindSafe, catch_unwind};

const EMPTY: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[],
};

const LIGHTING: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[
        Member::Field(FieldDef {
            name: "Brightness",
            default: Literal::Float(1.0),
            annotations: &[Annotation::UseAsShaderConstant(true)],
        }),
        Member::Field(FieldDef {
            name: "Tint",
            default: Literal::Float3([1.0, 0.5, 0.25]),
            annotations: &[Annotation::UseAsShaderConstant(true)],
        }),
    ],
};

/// A device and queue, or `None` on machines without an adapter.
fn device() -> Option<(wgpu::Device, wgpu::Queue)> {
    test_executors::sleep_on(async {
        let descriptor = wgpu::InstanceDescriptor::from_env_or_default();
        let instance = wgpu::Instance::new(&descriptor);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}

#[test]
fn uploads_and_checks_layout() {
    let Some((device, queue)) = device() else {
        println!("no adapter available, skipping");
        return;
    };

    let empty_schema = SettingsSchema::build(&EMPTY).expect("valid schema");
    let empty_layout = ConstantBufferLayout::pack(&empty_schema).expect("packs");
    let mut empty = ConstantBuffer::new(&device, &empty_layout, "empty settings");
    assert_eq!(empty.buffer().size(), 16);
    empty.update(&queue, &empty_layout, &ValueStore::new(&empty_schema));

    let schema = SettingsSchema::build(&LIGHTING).expect("valid schema");
    let layout = ConstantBufferLayout::pack(&schema).expect("packs");
    assert_eq!(layout.total_size(), 32);
    let mut store = ValueStore::new(&schema);
    let mut lighting = ConstantBuffer::new(&device, &layout, "lighting settings");
    assert_eq!(lighting.buffer().size(), 32);

    let brightness = schema.field_id("Brightness").expect("exists");
    store
        .set(brightness, Value::Float(0.5))
        .expect("float into float");
    lighting.update(&queue, &layout, &store.snapshot());
    queue.submit([]);

    let mismatch = catch_unwind(AssertUnwindSafe(|| {
        lighting.update(&queue, &empty_layout, &store);
    }));
    assert!(mismatch.is_err());
}
