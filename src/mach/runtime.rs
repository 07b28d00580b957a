use super::{compile, Address, Chunk, Opcode, Operation, Stack, Val};
use crate::error;
use crate::lang::Error;
use std::collections::VecDeque;
use std::convert::TryFrom;
use tracing::{debug, enabled, trace, Level};

type Result<T> = std::result::Result<T, Error>;

/// ## Virtual machine
///
/// Holds the worker's hand, the floor tiles, the inbox and the outbox.
/// A program is loaded with `enter` and then run in batches with `execute`
/// so a caller can regain control between batches.

pub struct Runtime {
    chunk: Chunk,
    size: usize,
    ip: Address,
    hand: Val,
    stack: Stack<Val>,
    inbox: VecDeque<Val>,
    outbox: Vec<Val>,
    floor: Vec<Val>,
    steps: usize,
    state: State,
    running: bool,
    unreported: bool,
    errors: Vec<Error>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ok,
    CompileError,
    RuntimeError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Worker instructions executed.
    pub steps: usize,
    /// Statements in the program.
    pub size: usize,
}

/// Result of one call to `execute`.
#[derive(Debug, PartialEq)]
pub enum Event {
    Running,
    Stopped,
    Errors(Vec<Error>),
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(vec![], vec![])
    }
}

impl Runtime {
    /// A machine with its inbox queue and initial floor. The floor's
    /// length is the number of tiles available.
    pub fn new<I: IntoIterator<Item = Val>>(inbox: I, floor: Vec<Val>) -> Runtime {
        Runtime {
            chunk: Chunk::new(),
            size: 0,
            ip: 0,
            hand: Val::Empty,
            stack: Stack::new("OPERAND STACK OVERFLOW"),
            inbox: inbox.into_iter().collect(),
            outbox: vec![],
            floor,
            steps: 0,
            state: State::Ok,
            running: false,
            unreported: false,
            errors: vec![],
        }
    }

    /// Compiles and runs `source` to completion.
    pub fn interpret(&mut self, source: &str) -> (State, Metrics) {
        if self.enter(source) {
            while let Event::Running = self.execute(usize::max_value()) {}
        }
        (self.state, self.metrics())
    }

    /// Compiles `source` and loads it. On failure the compile errors are
    /// delivered by the next `execute`.
    pub fn enter(&mut self, source: &str) -> bool {
        let mut chunk = Chunk::new();
        match compile(source, &mut chunk) {
            Ok(size) => {
                self.load(chunk, size);
                true
            }
            Err(errors) => {
                debug!(errors = errors.len(), "compile failed");
                self.load(Chunk::new(), 0);
                self.running = false;
                self.state = State::CompileError;
                self.errors = errors;
                self.unreported = true;
                false
            }
        }
    }

    /// Loads an already compiled chunk of `size` statements.
    pub fn load(&mut self, chunk: Chunk, size: usize) {
        self.chunk = chunk;
        self.size = size;
        self.ip = 0;
        self.hand = Val::Empty;
        self.stack.clear();
        self.steps = 0;
        self.state = State::Ok;
        self.running = true;
        self.unreported = false;
        self.errors.clear();
    }

    /// Stops the current program; the next `execute` reports `Stopped`.
    pub fn interrupt(&mut self) {
        self.running = false;
        self.stack.clear();
    }

    /// Runs up to `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.unreported {
            self.unreported = false;
            return Event::Errors(self.errors.clone());
        }
        if !self.running {
            return Event::Stopped;
        }
        for _ in 0..cycles {
            match self.step() {
                Ok(true) => {}
                Ok(false) => {
                    self.running = false;
                    debug!(
                        steps = self.steps,
                        size = self.size,
                        stack = self.stack.len(),
                        "halted"
                    );
                    return Event::Stopped;
                }
                Err(error) => {
                    self.running = false;
                    self.stack.clear();
                    self.state = State::RuntimeError;
                    debug!(%error, steps = self.steps, "runtime error");
                    self.errors.push(error.clone());
                    return Event::Errors(vec![error]);
                }
            }
        }
        Event::Running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            steps: self.steps,
            size: self.size,
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn hand(&self) -> &Val {
        &self.hand
    }

    pub fn inbox(&self) -> &VecDeque<Val> {
        &self.inbox
    }

    pub fn outbox(&self) -> &[Val] {
        &self.outbox
    }

    pub fn floor(&self) -> &[Val] {
        &self.floor
    }

    /// Picks up `val`. Nothing can be picked up from an empty slot.
    pub fn take(&mut self, val: Val) -> Result<()> {
        if val.is_empty() {
            return Err(error!(EmptyValue; "Empty value! There is nothing to pick up!"));
        }
        self.hand = val;
        Ok(())
    }

    /// Empties the hand, returning what it held.
    pub fn drop(&mut self, op: Opcode) -> Result<Val> {
        if self.hand.is_empty() {
            return Err(Self::empty_hand(op));
        }
        Ok(std::mem::take(&mut self.hand))
    }

    /// Copies the hand onto tile `idx`.
    pub fn copy_to_register(&mut self, idx: i64, op: Opcode) -> Result<()> {
        let idx = self.register(idx)?;
        if self.hand.is_empty() {
            return Err(Self::empty_hand(op));
        }
        self.floor[idx] = self.hand.clone();
        Ok(())
    }

    /// The value on tile `idx`, which must hold something.
    pub fn check_register(&self, idx: i64, op: Opcode) -> Result<Val> {
        let idx = self.register(idx)?;
        match &self.floor[idx] {
            Val::Empty => Err(error!(EmptyTile; format!(
                "Empty value! You can't {} with an empty tile on the floor! \
                 Try writing something to that tile first.",
                op
            ))),
            val => Ok(val.clone()),
        }
    }

    fn register(&self, idx: i64) -> Result<usize> {
        match usize::try_from(idx) {
            Ok(idx) if idx < self.floor.len() => Ok(idx),
            _ => Err(error!(TileOutOfRange; format!(
                "There are only {} slots available on this floor!",
                self.floor.len()
            ))),
        }
    }

    fn empty_hand(op: Opcode) -> Error {
        error!(EmptyHand; format!("Empty value! You can't {} with empty hands!", op))
    }

    fn step(&mut self) -> Result<bool> {
        let addr = self.ip;
        self.instruction()
            .map_err(|error| match (error.line(), self.chunk.line(addr)) {
                (None, Some(line)) => error.in_line(line),
                _ => error,
            })
    }

    fn instruction(&mut self) -> Result<bool> {
        if enabled!(Level::TRACE) {
            let (text, _) = self.chunk.disassemble_instruction(self.ip);
            trace!(hand = %self.hand, stack = ?self.stack, floor = ?self.floor, "{}", text);
        }
        let opcode = Opcode::try_from(self.read_byte()?)?;
        match opcode {
            Opcode::Halt => return Ok(false),
            Opcode::Pop => {
                self.stack.pop()?;
            }
            Opcode::Constant => {
                let val = self.read_constant()?;
                self.stack.push(val)?;
            }
            Opcode::Inbox => match self.inbox.pop_front() {
                Some(val) => self.take(val)?,
                None => return Ok(false),
            },
            Opcode::Outbox => {
                let val = self.drop(opcode)?;
                self.outbox.push(val);
            }
            Opcode::Jump => {
                self.ip = self.read_byte()? as Address;
            }
            Opcode::JumpZ | Opcode::JumpN => {
                let target = self.read_byte()?;
                let taken = match self.hand {
                    Val::Int(n) if opcode == Opcode::JumpZ => n == 0,
                    Val::Int(n) => n < 0,
                    Val::Empty | Val::Char(_) | Val::Label(_) => false,
                };
                if taken {
                    self.ip = target as Address;
                }
            }
            Opcode::CopyFrom => {
                let idx = self.pop_tile(opcode)?;
                let val = self.check_register(idx, opcode)?;
                self.take(val)?;
            }
            Opcode::CopyTo => {
                let idx = self.pop_tile(opcode)?;
                self.copy_to_register(idx, opcode)?;
            }
            Opcode::Add | Opcode::Sub => {
                let idx = self.pop_tile(opcode)?;
                let tile = self.check_register(idx, opcode)?;
                self.hand = match opcode {
                    Opcode::Add => Operation::sum(opcode, &self.hand, &tile)?,
                    _ => Operation::subtract(opcode, &self.hand, &tile)?,
                };
            }
            Opcode::BumpUp | Opcode::BumpDn => {
                let idx = self.pop_tile(opcode)?;
                let tile = self.check_register(idx, opcode)?;
                let delta = if opcode == Opcode::BumpUp { 1 } else { -1 };
                let val = Operation::bump(opcode, &tile, delta)?;
                self.copy_value(idx, val.clone())?;
                self.hand = val;
            }
            Opcode::Negate => {
                let val = self.stack.pop()?;
                self.stack.push(Operation::negate(val)?)?;
            }
        }
        if opcode.is_step() {
            self.steps += 1;
        }
        Ok(true)
    }

    fn copy_value(&mut self, idx: i64, val: Val) -> Result<()> {
        let idx = self.register(idx)?;
        self.floor[idx] = val;
        Ok(())
    }

    fn pop_tile(&mut self, op: Opcode) -> Result<i64> {
        match self.stack.pop()? {
            Val::Int(n) => Ok(n),
            Val::Empty | Val::Char(_) | Val::Label(_) => Err(error!(NotANumber; format!(
                "Value is not a number, cannot {}!",
                op
            ))),
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        match self.chunk.byte(self.ip) {
            Some(byte) => {
                self.ip += 1;
                Ok(byte)
            }
            None => Err(error!(InternalError; "Ran past the end of the program.")),
        }
    }

    fn read_constant(&mut self) -> Result<Val> {
        let index = self.read_byte()? as usize;
        match self.chunk.constant(index) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(InternalError; format!("Missing constant {}.", index))),
        }
    }
}
