use dotnet_demangle::{
    address_class, demangle, format_symbol, format_symbol_into, SymbolData,
    SymbolLoadFailureTable, UsageType,
};

fn jitted<'a>(name: &'a str, module: &'a str) -> SymbolData<'a> {
    SymbolData {
        base_address_class: 1000,
        name,
        image_file_name: module,
        image_original_file_name: "",
        usage: UsageType::JITTED,
        load_failure_code: 0,
    }
}

fn precompiled<'a>(name: &'a str, module: &'a str) -> SymbolData<'a> {
    SymbolData {
        usage: UsageType(2),
        ..jitted(name, module)
    }
}

#[test]
fn typical_managed_stack_frames() {
    // The kind of frames a profiler shows for an async LINQ-heavy app.
    let cases = [
        (
            jitted("MyApp.Program::Main 0x0", "MyApp.exe"),
            "MyApp!Program::Main",
        ),
        (
            jitted(
                "MyApp.OrderService+<ProcessAsync>d__4::MoveNext",
                "MyApp.dll",
            ),
            "MyApp!OrderService+ProcessAsync::MoveNext",
        ),
        (
            jitted(
                "MyApp.OrderService+<>c__DisplayClass7_0::<ProcessAsync>b__1",
                "MyApp.dll",
            ),
            "MyApp!OrderService::ProcessAsync+()=>{} [1]",
        ),
        (
            jitted(
                "MyApp.Cache`2[System.__Canon,System.__Canon]::TryGet",
                "MyApp.dll",
            ),
            "MyApp!Cache<T,T2>::TryGet",
        ),
        (
            jitted("MyApp.Program::<Main>g__Validate|0_3", "MyApp.dll"),
            "MyApp!Program::Main+Validate",
        ),
    ];
    for (symbol, expected) in cases {
        assert_eq!(format_symbol(&symbol, &()), expected, "for {:?}", symbol.name);
    }
}

#[test]
fn native_image_frames() {
    let sym = precompiled(
        "System.Linq.Enumerable.Count[System.__Canon](System.Collections.Generic.IEnumerable`1<System.__Canon>)",
        "System.Core.ni.dll",
    );
    assert_eq!(
        format_symbol(&sym, &()),
        "System.Core!System.Linq.Enumerable::Count<T>"
    );

    // Without a signature shape, precompiled names pass through untouched.
    let sym = precompiled("coreclr_initialize", "coreclr.dll");
    assert_eq!(format_symbol(&sym, &()), "coreclr.dll!coreclr_initialize");
}

#[test]
fn load_failures_replace_the_function_name() {
    let table: SymbolLoadFailureTable = [
        (1, "Symbol file not found"),
        (2, "Symbol file mismatch"),
    ]
    .into_iter()
    .collect();

    let mut sym = jitted("MyApp.Program::Main", "MyApp.dll");
    sym.load_failure_code = 2;
    assert_eq!(format_symbol(&sym, &table), "MyApp!<Symbol file mismatch>");

    // Codes without a table entry fall back to the generic label; the call
    // still succeeds.
    sym.load_failure_code = 17;
    assert_eq!(format_symbol(&sym, &table), "MyApp!<Unknown failure>");
}

#[test]
fn pseudo_symbols_ignore_all_other_metadata() {
    let mut sym = jitted("[Root]", "whatever.dll");
    sym.load_failure_code = 99;
    sym.base_address_class = address_class::ROOT;
    assert_eq!(format_symbol(&sym, &()), "[Root]");
    sym.base_address_class = address_class::UNRESOLVED;
    assert_eq!(format_symbol(&sym, &()), "");
    sym.base_address_class = address_class::NOT_APPLICABLE;
    assert_eq!(format_symbol(&sym, &()), "n/a");
    sym.base_address_class = address_class::IDLE;
    assert_eq!(format_symbol(&sym, &()), "[Idle]");
}

#[test]
fn reused_buffer_matches_fresh_allocation() {
    let symbols = [
        jitted("MyApp.Program::Main", "MyApp.dll"),
        jitted("", "MyApp.dll"),
        precompiled("System.String.Intern(System.String)", "mscorlib.dll"),
    ];
    let mut buffer = String::new();
    for sym in &symbols {
        format_symbol_into(sym, &(), &mut buffer);
        assert_eq!(buffer, format_symbol(sym, &()));
    }
}

#[test]
fn standalone_demangle_matches_formatter_output() {
    let name = "MyApp.Widgets.Grid`1+<>c__DisplayClass4_0[System.__Canon]::<Render>b__0";
    let sym = jitted(name, "MyApp.Widgets.dll");
    let formatted = format_symbol(&sym, &());
    // The formatter strips the module prefix before demangling, so the
    // standalone entry point sees the name as-is.
    assert_eq!(formatted, format!("MyApp.Widgets!{}", demangle("Grid`1+<>c__DisplayClass4_0[System.__Canon]::<Render>b__0")));
    assert_eq!(formatted, "MyApp.Widgets!Grid<T>::Render+()=>{}");
}
