/*!
 * Memory Types
 * Common types for contiguous memory allocation
 */

use crate::core::errors::ErrorKind;
use crate::core::types::{Address, BlockId, RequestId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("invalid size: requested {size} bytes")]
    #[diagnostic(code(memory::invalid_size), help("Request at least one unit of memory."))]
    InvalidSize { size: Size },

    #[error("exceeds capacity: requested {requested} bytes, total memory is {capacity} bytes")]
    #[diagnostic(
        code(memory::exceeds_capacity),
        help("No single request can be larger than the whole memory.")
    )]
    ExceedsCapacity { requested: Size, capacity: Size },

    #[error("no block large enough: request {request_id} needs {requested} bytes")]
    #[diagnostic(
        code(memory::no_block_large_enough),
        help("Free memory is fragmented or exhausted. Release a block or try a smaller size.")
    )]
    NoBlockLargeEnough {
        requested: Size,
        request_id: RequestId,
    },

    #[error("invalid process name: name must not be blank")]
    #[diagnostic(code(memory::invalid_name))]
    InvalidName,

    #[error("invalid capacity: memory must hold at least one unit")]
    #[diagnostic(code(memory::invalid_capacity))]
    InvalidCapacity,

    #[error("partition violation: {0}")]
    #[diagnostic(
        code(memory::partition_violation),
        help("Blocks no longer tile [0, capacity) exactly. This is an allocator bug.")
    )]
    PartitionViolation(String),

    #[error("invalid allocation policy '{0}'. Valid: first_fit, best_fit, worst_fit")]
    #[diagnostic(
        code(memory::invalid_policy),
        help("Use first_fit, best_fit or worst_fit.")
    )]
    InvalidPolicy(String),
}

impl MemoryError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoBlockLargeEnough { .. } => ErrorKind::ResourceExhausted,
            Self::PartitionViolation(_) => ErrorKind::Corruption,
            _ => ErrorKind::Validation,
        }
    }

    /// Short, stable reason string for presentation
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSize { .. } => "invalid size",
            Self::ExceedsCapacity { .. } => "exceeds capacity",
            Self::NoBlockLargeEnough { .. } => "no block large enough",
            Self::InvalidName => "invalid name",
            Self::InvalidCapacity => "invalid capacity",
            Self::PartitionViolation(_) => "partition violation",
            Self::InvalidPolicy(_) => "invalid policy",
        }
    }
}

/// Allocation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocationPolicy {
    /// Lowest-addressed free block that fits
    #[default]
    FirstFit,
    /// Smallest free block that fits
    BestFit,
    /// Largest free block that fits
    WorstFit,
}

impl AllocationPolicy {
    pub const ALL: [AllocationPolicy; 3] = [Self::FirstFit, Self::BestFit, Self::WorstFit];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstFit => "first_fit",
            Self::BestFit => "best_fit",
            Self::WorstFit => "worst_fit",
        }
    }
}

impl FromStr for AllocationPolicy {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first_fit" | "firstfit" | "first" => Ok(Self::FirstFit),
            "best_fit" | "bestfit" | "best" => Ok(Self::BestFit),
            "worst_fit" | "worstfit" | "worst" => Ok(Self::WorstFit),
            _ => Err(MemoryError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AllocationPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AllocationPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Who holds an allocated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOwner {
    pub request_id: RequestId,
    pub name: String,
}

/// Memory block metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub id: BlockId,
    pub start: Address,
    pub size: Size,
    pub allocated: bool,
    /// Present iff `allocated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<BlockOwner>,
}

impl MemoryBlock {
    pub fn free(id: BlockId, start: Address, size: Size) -> Self {
        Self {
            id,
            start,
            size,
            allocated: false,
            owner: None,
        }
    }

    pub fn allocated(id: BlockId, start: Address, size: Size, owner: BlockOwner) -> Self {
        Self {
            id,
            start,
            size,
            allocated: true,
            owner: Some(owner),
        }
    }

    /// One past the last address in the block
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.allocated
    }

    /// Release the block and forget its owner
    pub fn release(&mut self) {
        self.allocated = false;
        self.owner = None;
    }

    pub fn owned_by(&self, request_id: RequestId) -> bool {
        self.owner.as_ref().is_some_and(|o| o.request_id == request_id)
    }
}

/// Allocation log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub id: RequestId,
    pub process_name: String,
    pub size: Size,
    pub allocated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
}

/// Successful allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub request_id: RequestId,
    pub block_id: BlockId,
    pub start: Address,
    pub size: Size,
}
