use std::fs;

use quackscript::{interpreter::host::Host, run_script};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "quack"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;

        let (host, output) = Host::collecting();
        if let Err(e) = run_script(&source, host) {
            panic!("Demo {path:?} failed to parse:\n{source}\nError: {e}");
        }
        let stderr = output.borrow().stderr.join("\n");
        assert!(stderr.is_empty(), "Demo {path:?} raised:\n{stderr}");
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
