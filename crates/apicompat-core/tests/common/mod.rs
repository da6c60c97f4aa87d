#![allow(dead_code)]

use apicompat_core::model::{AssemblyDef, MemberDef, NamespaceDef, TypeDef};
use apicompat_core::{run_comparison, MemorySink, RunLabels, RunOutcome, RunSettings};

/// `Lib` with `Foo.Bar(int)` and a couple of neighbours
pub fn contract_lib() -> AssemblyDef {
    AssemblyDef::new("Lib", "1.0.0.0").with_namespace(
        NamespaceDef::new("Foo")
            .with_type(
                TypeDef::class("Bar")
                    .with_member(MemberDef::constructor())
                    .with_member(MemberDef::method("Bar").with_param("System.Int32"))
                    .with_member(MemberDef::method("Bar").with_param("System.String"))
                    .with_member(MemberDef::property("Count", "System.Int32")),
            )
            .with_type(
                TypeDef::interface("IWidget").with_member(MemberDef::method("Run").abstract_member()),
            ),
    )
}

/// The same library with `Bar(System.Int32)` removed
pub fn implementation_without_bar_int() -> AssemblyDef {
    AssemblyDef::new("Lib", "1.0.0.0").with_namespace(
        NamespaceDef::new("Foo")
            .with_type(
                TypeDef::class("Bar")
                    .with_member(MemberDef::constructor())
                    .with_member(MemberDef::method("Bar").with_param("System.String"))
                    .with_member(MemberDef::property("Count", "System.Int32")),
            )
            .with_type(
                TypeDef::interface("IWidget").with_member(MemberDef::method("Run").abstract_member()),
            ),
    )
}

pub fn labels() -> RunLabels {
    RunLabels::new("contract", "implementation")
}

/// Run a comparison into memory
pub fn run(
    contract: &[AssemblyDef],
    implementation: &[AssemblyDef],
    settings: &RunSettings,
) -> (RunOutcome, MemorySink) {
    let mut sink = MemorySink::new();
    let outcome = run_comparison(contract, implementation, settings, &labels(), &mut sink)
        .expect("comparison should succeed");
    (outcome, sink)
}
