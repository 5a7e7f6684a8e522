//! Shared fakes for the integration tests.
#![allow(dead_code)]

use std::{cell::Cell, convert::Infallible, rc::Rc};

use embedded_hal::{digital, pwm};
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use rova_core::utils::{
    config::{MotorConfig, PinMap},
    controllers::{Controller, DriveGroup, Motor, Side, SpeedState},
};

/// Direction input that refuses to go high while its partner is high.
#[derive(Clone)]
pub struct Line {
    level: Rc<Cell<bool>>,
    partner: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl digital::ErrorType for Line {
    type Error = Infallible;
}

impl digital::OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.writes.set(self.writes.get() + 1);
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        assert!(!self.partner.get(), "both direction inputs asserted");
        self.writes.set(self.writes.get() + 1);
        self.level.set(true);
        Ok(())
    }
}

/// 16-bit PWM output recording the last duty.
#[derive(Clone)]
pub struct Duty {
    value: Rc<Cell<u16>>,
    writes: Rc<Cell<usize>>,
}

impl Duty {
    pub fn new() -> Self {
        Self {
            value: Rc::new(Cell::new(0)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u16 {
        self.value.get()
    }
}

impl pwm::ErrorType for Duty {
    type Error = Infallible;
}

impl pwm::SetDutyCycle for Duty {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(
        &mut self,
        duty: u16,
    ) -> Result<(), Infallible> {
        self.writes.set(self.writes.get() + 1);
        self.value.set(duty);
        Ok(())
    }
}

/// Read-only view of one motor's signals.
#[derive(Clone)]
pub struct MotorProbe {
    forward: Rc<Cell<bool>>,
    reverse: Rc<Cell<bool>>,
    duty: Rc<Cell<u16>>,
}

impl MotorProbe {
    /// Signed speed as seen on the pins: direction sign times duty.
    pub fn signed(&self) -> i32 {
        match (self.forward.get(), self.reverse.get()) {
            (true, false) => i32::from(self.duty.get()),
            (false, true) => -i32::from(self.duty.get()),
            (false, false) => {
                assert_eq!(self.duty.get(), 0, "duty set while coasting");
                0
            }
            (true, true) => panic!("both direction inputs asserted"),
        }
    }
}

pub type SimMotor = Motor<Line, Duty>;
pub type SimController = Controller<SimMotor, 2, 2>;

pub struct Rig {
    pub left: [MotorProbe; 2],
    pub right: [MotorProbe; 2],
    writes: Rc<Cell<usize>>,
}

impl Rig {
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn left_speeds(&self) -> [i32; 2] {
        [self.left[0].signed(), self.left[1].signed()]
    }

    pub fn right_speeds(&self) -> [i32; 2] {
        [self.right[0].signed(), self.right[1].signed()]
    }
}

fn sim_motor(
    config: &MotorConfig,
    writes: &Rc<Cell<usize>>,
) -> (SimMotor, MotorProbe) {
    let forward = Rc::new(Cell::new(false));
    let reverse = Rc::new(Cell::new(false));
    let duty = Duty {
        value: Rc::new(Cell::new(0)),
        writes: writes.clone(),
    };
    let probe = MotorProbe {
        forward: forward.clone(),
        reverse: reverse.clone(),
        duty: duty.value.clone(),
    };
    let motor = Motor::new(
        Line {
            level: forward.clone(),
            partner: reverse.clone(),
            writes: writes.clone(),
        },
        Line {
            level: reverse,
            partner: forward,
            writes: writes.clone(),
        },
        duty,
        config,
    )
    .unwrap();
    (motor, probe)
}

/// Controller wired like the default pin map, plus probes on every motor.
pub fn rig(speeds: SpeedState) -> (SimController, Rig) {
    let map = PinMap::default();
    let writes = Rc::new(Cell::new(0));
    let (l0, pl0) = sim_motor(&map.left[0], &writes);
    let (l1, pl1) = sim_motor(&map.left[1], &writes);
    let (r0, pr0) = sim_motor(&map.right[0], &writes);
    let (r1, pr1) = sim_motor(&map.right[1], &writes);

    let drive = DriveGroup::new(Side::new([l0, l1]), Side::new([r0, r1]));
    let rig = Rig {
        left: [pl0, pl1],
        right: [pr0, pr1],
        writes,
    };
    (Controller::new(drive, speeds), rig)
}

/// In-memory connection: serves `incoming` to reads and collects writes.
pub struct Transport {
    incoming: Vec<u8>,
    cursor: usize,
    pub outgoing: Vec<u8>,
    fail_writes: bool,
}

impl Transport {
    pub fn new(request: &[u8]) -> Self {
        Self {
            incoming: request.to_vec(),
            cursor: 0,
            outgoing: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn failing_writes(request: &[u8]) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(request)
        }
    }

    pub fn response(&self) -> &str {
        std::str::from_utf8(&self.outgoing).unwrap()
    }

    /// Response body after the blank line.
    pub fn body(&self) -> &str {
        self.response().split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
    }
}

impl ErrorType for Transport {
    type Error = ErrorKind;
}

impl Read for Transport {
    async fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Result<usize, ErrorKind> {
        let rest = &self.incoming[self.cursor..];
        let len = rest.len().min(buf.len());
        buf[..len].copy_from_slice(&rest[..len]);
        self.cursor += len;
        Ok(len)
    }
}

impl Write for Transport {
    async fn write(
        &mut self,
        buf: &[u8],
    ) -> Result<usize, ErrorKind> {
        if self.fail_writes {
            return Err(ErrorKind::ConnectionReset);
        }
        self.outgoing.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}
