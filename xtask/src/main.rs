fn execute(dir: &str, args: &[&str]) {
    let cmd = &args[0];
    let cmd_full = args.join(" ");
    eprintln!("Running '{}'", cmd_full);
    let status = std::process::Command::new(cmd)
        .current_dir(dir)
        .args(&args[1..])
        .spawn()
        .unwrap_or_else(|err| panic!("Could not start command '{}': {}", cmd_full, err))
        .wait()
        .unwrap_or_else(|err| panic!("cmd failed: '{}': {}", cmd_full, err));

    if !status.success() {
        eprintln!("Command '{}' terminated with a non-0 exit code", cmd_full);
        std::process::exit(1);
    }
    eprintln!("Finished: '{}'", cmd_full);
}

/// Native unit and integration tests.
fn test_native() {
    execute("wc_bridge", &["cargo", "test"]);
}

/// Browser tests (`wc_bridge/tests/web.rs`), run headless.
fn test_web(browser: &str) {
    let flag = format!("--{}", browser);
    execute(
        "wc_bridge",
        &["wasm-pack", "test", "--headless", &flag, "--test", "web"],
    );
}

fn main() {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let arg_refs: Vec<_> = args.iter().map(|x| x.as_str()).collect();

    match arg_refs.as_slice() {
        &["test"] => {
            test_native();
        }
        &["test-web"] => {
            test_web("firefox");
        }
        &["test-web", browser] => {
            test_web(browser);
        }
        &["test-all"] => {
            test_native();
            test_web("firefox");
        }
        _ => {
            eprintln!("Unknown arguments. Expected one of: test, test-web [browser], test-all");
            std::process::exit(1);
        }
    }
}
