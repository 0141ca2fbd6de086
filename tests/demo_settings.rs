// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use cbuffer_settings::Error;
use cbuffer_settings::annotation::Annotation;
use cbuffer_settings::demo;
use cbuffer_settings::layout::{ConstantBufferLayout, LayoutError};
use cbuffer_settings::schema::{FieldDef, GroupDef, Member, SettingsSchema};
use cbuffer_settings::store::{ValueSource, ValueStore};
use cbuffer_settings::ui::{self, PanelNode, Widget};
use cbuffer_settings::value::{Literal, Value};

const ENABLE_VSYNC: Member = Member::Field(FieldDef {
    name: "EnableVSync",
    default: Literal::Bool(true),
    annotations: &[
        Annotation::UseAsShaderConstant(false),
        Annotation::DisplayName("Enable VSync"),
        Annotation::HelpText("Enables or disables vertical sync during Present"),
    ],
});
const TIMELINE_ZOOM: Member = Member::Field(FieldDef {
    name: "TimelineZoom",
    default: Literal::Float(1.0),
    annotations: &[
        Annotation::UseAsShaderConstant(false),
        Annotation::MinValue(1.0),
        Annotation::MaxValue(16.0),
    ],
});
const USE_SPLIT_BARRIERS: Member = Member::Field(FieldDef {
    name: "UseSplitBarriers",
    default: Literal::Bool(false),
    annotations: &[Annotation::UseAsShaderConstant(false)],
});
const BRIGHTNESS: Member = Member::Field(FieldDef {
    name: "Brightness",
    default: Literal::Float(1.0),
    annotations: &[Annotation::UseAsShaderConstant(true)],
});

const GENERAL_ONLY: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[Member::Group(GroupDef {
        name: "General",
        annotations: &[Annotation::ExpandGroup(true)],
        members: &[ENABLE_VSYNC, TIMELINE_ZOOM, USE_SPLIT_BARRIERS],
    })],
};

const WITH_BRIGHTNESS: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[Member::Group(GroupDef {
        name: "General",
        annotations: &[Annotation::ExpandGroup(true)],
        members: &[ENABLE_VSYNC, TIMELINE_ZOOM, USE_SPLIT_BARRIERS, BRIGHTNESS],
    })],
};

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn no_shader_constants_packs_to_nothing() -> Result<(), Error> {
    let schema = SettingsSchema::build(&GENERAL_ONLY)?;
    let layout = ConstantBufferLayout::pack(&schema)?;
    assert_eq!(layout.total_size(), 0);
    assert!(layout.entries().is_empty());
    Ok(())
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn one_float_rounds_up_to_a_register() -> Result<(), Error> {
    let schema = SettingsSchema::build(&WITH_BRIGHTNESS)?;
    let layout = ConstantBufferLayout::pack(&schema)?;
    assert_eq!(layout.entries().len(), 1);
    let entry = &layout.entries()[0];
    assert_eq!(entry.field().path(), "General.Brightness");
    assert_eq!(entry.byte_offset(), 0);
    assert_eq!(entry.byte_size(), 4);
    assert_eq!(layout.total_size(), 16);

    let mut store = ValueStore::new(&schema);
    store
        .set(entry.field().id(), Value::Float(0.25))
        .expect("float into float");
    let snapshot = store.snapshot();
    let bytes = layout.to_bytes(&snapshot);
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[0..4], &0.25f32.to_le_bytes());
    assert_eq!(&bytes[4..], &[0; 12]);
    Ok(())
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn timeline_zoom_clamps() -> Result<(), Error> {
    let schema = SettingsSchema::build(&demo::SETTINGS)?;
    let mut store = ValueStore::new(&schema);
    let zoom = schema.field_id(demo::TIMELINE_ZOOM).expect("zoom exists");

    let cases = [(20.0, 16.0, true), (0.0, 1.0, true), (8.0, 8.0, false)];
    for (written, stored, clamped) in cases {
        let outcome = store.set(zoom, Value::Float(written)).expect("float into float");
        assert_eq!(outcome.is_clamped(), clamped, "writing {written}");
        assert_eq!(store.value(zoom), &Value::Float(stored), "writing {written}");
    }
    Ok(())
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn demo_ui() -> Result<(), Error> {
    let schema = SettingsSchema::build(&demo::SETTINGS)?;
    let store = ValueStore::new(&schema);
    let description = ui::describe(&store);

    let PanelNode::Group(general) = &description.root.children[0] else {
        panic!("General should be a group");
    };
    assert_eq!(general.name, "General");
    assert!(general.expanded);
    assert_eq!(general.children.len(), 6);

    let vsync = description
        .field(schema.field_id(demo::ENABLE_VSYNC).expect("vsync exists"))
        .expect("vsync panel");
    assert_eq!(vsync.display_name, "Enable VSync");
    assert_eq!(
        vsync.help_text,
        Some("Enables or disables vertical sync during Present")
    );
    assert_eq!(vsync.widget, Widget::Checkbox);
    assert_eq!(vsync.value, Value::Bool(true));

    let zoom = description
        .field(schema.field_id(demo::TIMELINE_ZOOM).expect("zoom exists"))
        .expect("zoom panel");
    assert_eq!(zoom.display_name, "TimelineZoom");
    assert_eq!(zoom.help_text, None);
    assert_eq!((zoom.min, zoom.max), (Some(1.0), Some(16.0)));
    assert_eq!(zoom.widget, Widget::Slider);
    Ok(())
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn demo_has_no_shader_constants() -> Result<(), Error> {
    let schema = SettingsSchema::build(&demo::SETTINGS)?;
    let layout = ConstantBufferLayout::pack(&schema)?;
    assert!(layout.is_empty());
    assert!(schema.fields().all(|f| !f.is_shader_constant()));
    Ok(())
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn startup_errors_convert() {
    const BAD_SCHEMA: GroupDef = GroupDef {
        name: "AppSettings",
        annotations: &[],
        members: &[Member::Field(FieldDef {
            name: "EnableVSync",
            default: Literal::Bool(true),
            annotations: &[Annotation::MaxValue(1.0)],
        })],
    };
    const BAD_LAYOUT: GroupDef = GroupDef {
        name: "AppSettings",
        annotations: &[],
        members: &[Member::Field(FieldDef {
            name: "Title",
            default: Literal::Text("demo"),
            annotations: &[Annotation::UseAsShaderConstant(true)],
        })],
    };

    fn startup(definition: &GroupDef) -> Result<usize, Error> {
        let schema = SettingsSchema::build(definition)?;
        let layout = ConstantBufferLayout::pack(&schema)?;
        Ok(layout.total_size())
    }

    let err = startup(&BAD_SCHEMA).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
    assert!(err.to_string().contains("EnableVSync"));

    let err = startup(&BAD_LAYOUT).unwrap_err();
    assert!(matches!(err, Error::Layout(LayoutError::Unsized { .. })));
    assert!(err.to_string().contains("Title"));

    assert_eq!(startup(&demo::SETTINGS), Ok(0));
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn rebuilding_resets_values() -> Result<(), Error> {
    let first = SettingsSchema::build(&WITH_BRIGHTNESS)?;
    let mut store = ValueStore::new(&first);
    let brightness = first.field_id("General.Brightness").expect("exists");
    store.set(brightness, Value::Float(3.0)).expect("float into float");

    let second = SettingsSchema::build(&WITH_BRIGHTNESS)?;
    assert_eq!(first, second);
    let fresh = ValueStore::new(&second);
    assert_eq!(fresh.get(brightness), &Value::Float(1.0));

    let a = ConstantBufferLayout::pack(&first)?;
    let b = ConstantBufferLayout::pack(&second)?;
    let offsets = |l: &ConstantBufferLayout<'_>| -> Vec<(String, usize)> {
        l.entries()
            .iter()
            .map(|e| (e.field().path().to_string(), e.byte_offset()))
            .collect()
    };
    assert_eq!(offsets(&a), offsets(&b));
    Ok(())
}
