use crate::mach::{Event, Runtime, Val};


fn ints(values: &[i64]) -> Vec<Val> {
    values.iter().copied().map(Val::Int).collect()
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

/// Runs until the program stops, collecting every reported error.
fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => break,
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
        }
        prev_running = event == Event::Running;
    }
    s
}
