use std::fmt;

/// Round to two decimal places, ties to even on the exact binary value.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Exact residual of the product; tells whether `scaled` landed on a
    // half that the unscaled value never was.
    let residual = value.mul_add(100.0, -scaled);
    let floor = scaled.floor();

    let rounded = if scaled - floor == 0.5 && residual > 0.0 {
        floor + 1.0
    } else if scaled - floor == 0.5 && residual < 0.0 {
        floor
    } else {
        scaled.round_ties_even()
    };

    rounded / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Short,
    Long,
}

/// The four rule sets, declared in evaluation (and emission) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    StrongShort,
    StrongLong,
    MildShort,
    MildLong,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        SignalKind::StrongShort,
        SignalKind::StrongLong,
        SignalKind::MildShort,
        SignalKind::MildLong,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::StrongShort => "必胜空单",
            SignalKind::StrongLong => "必胜多单",
            SignalKind::MildShort => "平时空单",
            SignalKind::MildLong => "平时多单",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            SignalKind::StrongShort | SignalKind::MildShort => Direction::Short,
            SignalKind::StrongLong | SignalKind::MildLong => Direction::Long,
        }
    }

    /// Fixed `(stop_loss, take_profit)` distances from entry.
    pub fn offsets(&self) -> (f64, f64) {
        match self {
            SignalKind::StrongShort | SignalKind::StrongLong => (13.0, 15.0),
            SignalKind::MildShort | SignalKind::MildLong => (12.0, 14.0),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalEvent {
    pub kind: SignalKind,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl SignalEvent {
    pub fn at_close(kind: SignalKind, close: f64) -> Self {
        let (sl, tp) = kind.offsets();
        let (stop_loss, take_profit) = match kind.direction() {
            Direction::Short => (close + sl, close - tp),
            Direction::Long => (close - sl, close + tp),
        };

        Self {
            kind,
            entry: round2(close),
            stop_loss: round2(stop_loss),
            take_profit: round2(take_profit),
        }
    }

    /// Notification title, e.g. `XAUUSD 必胜空单`.
    pub fn title(&self, instrument: &str) -> String {
        format!("{} {}", instrument.replace('_', ""), self.kind.label())
    }

    pub fn content(&self) -> String {
        format!(
            "{} | 入场: {:.2} | 止损: {:.2} | 止盈: {:.2}",
            self.kind.label(),
            self.entry,
            self.stop_loss,
            self.take_profit
        )
    }
}
