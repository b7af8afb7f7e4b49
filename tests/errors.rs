use std::path::{Path, PathBuf};

use hack_asm::assembler::{run, AsmConfig};
use hack_asm::{assemble, AsmError};

struct Scratch(PathBuf);

impl Scratch {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("hack_asm_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Scratch(dir)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn config(out: &Path) -> AsmConfig {
    AsmConfig { output: out.to_path_buf(), ..AsmConfig::default() }
}

#[test]
fn bad_comp_writes_nothing() {
    let dir = Scratch::new("bad_comp");
    let src = dir.path("prog.asm");
    let out = dir.path("out.hack");
    std::fs::write(&src, "@2\n// note\nD=X\n@3\n").unwrap();

    let err = run(&src, &config(&out)).unwrap_err();
    assert!(matches!(err, AsmError::InvalidComputation { line: 3, ref comp } if comp == "X"));
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(&dir.0).unwrap().count(), 1);
}

#[test]
fn failed_run_keeps_previous_output() {
    let dir = Scratch::new("keep_prev");
    let src = dir.path("prog.asm");
    let out = dir.path("out.hack");
    std::fs::write(&out, "previous\n").unwrap();
    std::fs::write(&src, "@2\nD;JUMP\n").unwrap();

    let err = run(&src, &config(&out)).unwrap_err();
    assert!(matches!(err, AsmError::InvalidJump { line: 2, .. }));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous\n");
}

#[test]
fn successful_run_writes_output_and_symbols() {
    let dir = Scratch::new("ok");
    let src = dir.path("prog.asm");
    let out = dir.path("prog.hack");
    let syms = dir.path("prog.json");
    std::fs::write(&src, "(TOP)\n@x\nM=0\n@TOP\n0;JMP\n").unwrap();

    let cfg = AsmConfig { symbols: Some(syms.clone()), ..config(&out) };
    let asm = run(&src, &cfg).unwrap();
    assert_eq!(asm.words.len(), 4);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "0000000000010000\n1110101010001000\n0000000000000000\n1110101010000111\n"
    );
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&syms).unwrap()).unwrap();
    let top = json.as_array().unwrap().iter().find(|s| s["name"] == "TOP").unwrap();
    assert_eq!(top["value"], 0);
    assert_eq!(top["kind"], "label");
}

#[test]
fn unwritable_symbol_map_writes_nothing() {
    let dir = Scratch::new("bad_symbols");
    let src = dir.path("prog.asm");
    let out = dir.path("out.hack");
    std::fs::write(&src, "@x\nM=0\n").unwrap();

    let cfg = AsmConfig { symbols: Some(dir.path("missing/s.json")), ..config(&out) };
    let err = run(&src, &cfg).unwrap_err();
    assert!(matches!(err, AsmError::Io { ref path, .. } if path.ends_with("missing/s.json")));
    assert!(!out.exists());
    // only the source is left in the directory
    assert_eq!(std::fs::read_dir(&dir.0).unwrap().count(), 1);
}

#[test]
fn missing_source_is_io_error() {
    let dir = Scratch::new("missing");
    let out = dir.path("out.hack");
    let err = run(&dir.path("nope.asm"), &config(&out)).unwrap_err();
    assert!(matches!(err, AsmError::Io { .. }));
    assert!(!out.exists());
}

#[test]
fn errors_carry_source_line() {
    let cases: [(&str, usize); 5] = [
        ("@1\n\nMD=D+1\nDA=M", 4),
        ("// c\nD=D*A", 2),
        ("D;JXX", 1),
        ("@1\n@40000", 2),
        ("(L)\n@1\n(L)", 3),
    ];
    for (src, line) in cases {
        let err = assemble(src).unwrap_err();
        assert_eq!(err.line(), Some(line), "{src:?}: {err}");
    }
}

#[test]
fn variable_cursor_past_range_is_range_error() {
    let mut src = String::new();
    // 16..=32767 is exactly 32752 variables; one more overflows
    for i in 0..32753 {
        src.push_str(&format!("@v{i}\n"));
    }
    let err = assemble(&src).unwrap_err();
    assert!(matches!(err, AsmError::Range { line: 32753, .. }));
}

#[test]
fn error_messages_name_the_token() {
    let err = assemble("AMX=D").unwrap_err();
    assert_eq!(err.to_string(), "line 1: invalid destination `AMX`");
    let err = assemble("(R1)\n@0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 1: symbol `R1` already bound to 1, cannot rebind to 0"
    );
}
