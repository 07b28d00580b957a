#![allow(dead_code)]
use hrm::mach::{Event, Metrics, Runtime, State, Val};

pub fn ints(values: &[i64]) -> Vec<Val> {
    values.iter().copied().map(Val::Int).collect()
}

pub fn vals(s: &str) -> Vec<Val> {
    s.split(',')
        .map(|v| v.trim().parse().expect("bad test value"))
        .collect()
}

pub fn interpret(source: &str, inbox: Vec<Val>, floor: Vec<Val>) -> (Runtime, State, Metrics) {
    let mut runtime = Runtime::new(inbox, floor);
    let (state, metrics) = runtime.interpret(source);
    (runtime, state, metrics)
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
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
    for val in runtime.outbox() {
        s.push_str(&format!("{}\n", val));
    }
    s
}
