//! Fixed-latency streaming over a valid/ready handshake.
//!
//! A [`Pipeline`] wraps a [`Stage`] in a delay line of `Stage::LATENCY` slots.
//! Each step it is enabled, the pipeline takes at most one input group,
//! shifts every slot forward by one, and presents the oldest slot as output.
//! It is enabled whenever the consumer is ready or nothing is waiting at the
//! output, so a stalled consumer freezes the whole pipeline and nothing is
//! dropped or reordered.

use crate::config::CodecConfig;
use crate::error::Result;
use crate::lanes::{Decoder, Encoder};
use crate::symbol::{Codeword, Decoded, Symbol};
use std::borrow::Borrow;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A transform that can sit inside a [`Pipeline`].
pub trait Stage {
    type Input: ?Sized;
    type Output;

    /// Enabled steps between accepting a group and presenting its result.
    const LATENCY: usize;

    /// Bits per input group.
    fn input_width(&self) -> usize;

    /// Bits per output group.
    fn output_width(&self) -> usize;

    /// Transforms one accepted group, committing any state it carries.
    fn process(&mut self, input: &Self::Input) -> Result<Self::Output>;
}

impl Stage for Encoder {
    type Input = [Symbol];
    type Output = Vec<Codeword>;

    const LATENCY: usize = 2;

    fn input_width(&self) -> usize {
        self.lanes() * 9
    }

    fn output_width(&self) -> usize {
        self.lanes() * 10
    }

    fn process(&mut self, input: &[Symbol]) -> Result<Vec<Codeword>> {
        self.encode(input)
    }
}

impl Stage for Decoder {
    type Input = [Codeword];
    type Output = Vec<Decoded>;

    const LATENCY: usize = 1;

    fn input_width(&self) -> usize {
        self.lanes() * 10
    }

    /// Data, control flag and invalid flag per lane.
    fn output_width(&self) -> usize {
        self.lanes() * 10
    }

    fn process(&mut self, input: &[Codeword]) -> Result<Vec<Decoded>> {
        self.decode(input)
    }
}

/// Result of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    /// Whether the offered input group was taken. When false the producer
    /// keeps it and offers it again.
    pub accepted: bool,
    /// Group handed to the consumer on this step.
    pub output: Option<T>,
}

/// Counters over the life of a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Input groups taken
    pub accepted: u64,
    /// Output groups handed to the consumer
    pub emitted: u64,
    /// Steps frozen by a consumer that was not ready
    pub stalled: u64,
}

/// Fixed-latency wrapper around a [`Stage`].
#[derive(Debug)]
pub struct Pipeline<S: Stage> {
    stage: S,
    /// Front is the newest slot, back is the one presented to the consumer
    slots: VecDeque<Option<S::Output>>,
    stats: StreamStats,
}

/// Multi-lane encoder with a latency of two steps.
pub type StreamEncoder = Pipeline<Encoder>;

/// Multi-lane decoder with a latency of one step.
pub type StreamDecoder = Pipeline<Decoder>;

impl Pipeline<Encoder> {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        Ok(Self::from_stage(Encoder::new(config)?))
    }
}

impl Pipeline<Decoder> {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        Ok(Self::from_stage(Decoder::new(config)?))
    }
}

impl<S: Stage> Pipeline<S> {
    pub fn from_stage(stage: S) -> Self {
        assert!(S::LATENCY > 0, "pipeline stages need at least one slot");
        debug!(
            latency = S::LATENCY,
            input_width = stage.input_width(),
            output_width = stage.output_width(),
            "creating pipeline"
        );
        Self {
            slots: (0..S::LATENCY).map(|_| None).collect(),
            stage,
            stats: StreamStats::default(),
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn latency(&self) -> usize {
        S::LATENCY
    }

    pub fn input_width(&self) -> usize {
        self.stage.input_width()
    }

    pub fn output_width(&self) -> usize {
        self.stage.output_width()
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Groups accepted but not yet handed out.
    pub fn in_flight(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether a group is waiting at the output.
    pub fn output_valid(&self) -> bool {
        matches!(self.slots.back(), Some(Some(_)))
    }

    /// The group waiting at the output, if any.
    pub fn peek(&self) -> Option<&S::Output> {
        self.slots.back().and_then(Option::as_ref)
    }

    /// Whether a step with this consumer readiness would advance, i.e. the
    /// ready signal offered upstream.
    pub fn ready(&self, downstream_ready: bool) -> bool {
        downstream_ready || !self.output_valid()
    }

    /// Runs one step.
    ///
    /// `input` is the producer's offered group (`None` when it has nothing
    /// valid). On a stalled step nothing moves, the input is not taken and no
    /// output is produced. A stage error leaves the pipeline untouched.
    pub fn step(&mut self, input: Option<&S::Input>, downstream_ready: bool) -> Result<Step<S::Output>> {
        if !self.ready(downstream_ready) {
            self.stats.stalled += 1;
            trace!(in_flight = self.in_flight(), "pipeline stalled");
            return Ok(Step {
                accepted: false,
                output: None,
            });
        }

        let accepted = input.is_some();
        let entering = input.map(|group| self.stage.process(group)).transpose()?;
        if accepted {
            self.stats.accepted += 1;
        }

        Ok(Step {
            accepted,
            output: self.advance(entering),
        })
    }

    /// Steps with no input and a ready consumer until nothing is in flight.
    pub fn drain(&mut self) -> Vec<S::Output> {
        let mut outputs = Vec::with_capacity(self.in_flight());
        while self.in_flight() > 0 {
            outputs.extend(self.advance(None));
        }
        outputs
    }

    /// Feeds every group with a consumer that is always ready, then drains.
    pub fn run<I>(&mut self, inputs: I) -> Result<Vec<S::Output>>
    where
        I: IntoIterator,
        I::Item: Borrow<S::Input>,
    {
        let mut outputs = Vec::new();
        for input in inputs {
            outputs.extend(self.step(Some(input.borrow()), true)?.output);
        }
        outputs.extend(self.drain());
        Ok(outputs)
    }

    /// Drops every in-flight group and returns how many there were.
    ///
    /// Stage state, such as the encoder's running disparity, is kept.
    pub fn discard(&mut self) -> usize {
        let dropped = self.in_flight();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        dropped
    }

    fn advance(&mut self, entering: Option<S::Output>) -> Option<S::Output> {
        self.slots.push_front(entering);
        let output = self.slots.pop_back().flatten();
        if output.is_some() {
            self.stats.emitted += 1;
        }
        output
    }
}
