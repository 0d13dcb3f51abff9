use crate::chunk::DataChunk;
use crate::column::{Column, DataColumn};
use crate::error::{ColumnError, ColumnResult};
use crate::factory::{ensure_type_code, ColumnFactory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use vecframe_storage::{Chunk, RawAccess, RawColumn, TypeCode};

/// The label domain a categorical factory interprets codes with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Domain {
    /// No domain known yet; wrapped columns keep whatever domain they already record.
    #[default]
    Unbound,
    /// Ordered, distinct labels; code `i` means `labels[i]`.
    Bound(Arc<[Arc<str>]>),
}

impl Domain {
    fn from_labels<I, S>(labels: I) -> ColumnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let labels: Vec<Arc<str>> = labels.into_iter().map(Into::into).collect();
        {
            let mut seen = HashSet::with_capacity(labels.len());
            for label in &labels {
                if !seen.insert(label.as_ref()) {
                    return Err(ColumnError::DuplicateLabel(label.to_string()));
                }
            }
        }
        Ok(Domain::Bound(labels.into()))
    }

    pub fn labels(&self) -> Option<&Arc<[Arc<str>]>> {
        match self {
            Domain::Unbound => None,
            Domain::Bound(labels) => Some(labels),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Domain::Bound(_))
    }
}

/// Categorical columns: `i32` codes over [`TypeCode::Cat`] storage.
///
/// Codes are not range-checked when written; an out-of-range code surfaces
/// when it is decoded with [`EnumColumn::factor`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnumsRepr", into = "EnumsRepr")]
pub struct Enums {
    domain: Domain,
}

impl Enums {
    /// A factory bound to `labels`. Labels must be distinct.
    pub fn new<I, S>(labels: I) -> ColumnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Ok(Self {
            domain: Domain::from_labels(labels)?,
        })
    }

    /// A factory with no domain of its own.
    pub fn unbound() -> Self {
        Self {
            domain: Domain::Unbound,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// This factory, bound to `labels` in place of any previous domain.
    pub fn bind<I, S>(self, labels: I) -> ColumnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Ok(Self {
            domain: Domain::from_labels(labels)?,
        })
    }
}

impl ColumnFactory for Enums {
    type Value = i32;
    type Column = EnumColumn;

    fn type_code(&self) -> TypeCode {
        TypeCode::Cat
    }

    fn name(&self) -> &str {
        "Cats"
    }

    fn wrap_partition<'a>(&self, chunk: &'a Chunk) -> DataChunk<'a, i32> {
        DataChunk::new(chunk)
    }

    /// Installs this factory's domain on `vec` (replacing any recorded domain)
    /// when the factory is bound.
    fn wrap_column(&self, vec: RawColumn) -> ColumnResult<EnumColumn> {
        ensure_type_code(TypeCode::Cat, &vec)?;
        match &self.domain {
            Domain::Bound(labels) => vec.set_domain(Some(labels.clone())),
            Domain::Unbound => log::debug!(
                "{}: unbound factory keeps the recorded domain ({} labels)",
                vec.key(),
                vec.cardinality().unwrap_or(0)
            ),
        }
        Ok(EnumColumn {
            inner: DataColumn::new(vec, self.clone()),
        })
    }
}

#[derive(Serialize, Deserialize)]
struct EnumsRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<Vec<String>>,
}

impl TryFrom<EnumsRepr> for Enums {
    type Error = ColumnError;

    fn try_from(repr: EnumsRepr) -> ColumnResult<Self> {
        match repr.domain {
            Some(labels) => Enums::new(labels),
            None => Ok(Enums::unbound()),
        }
    }
}

impl From<Enums> for EnumsRepr {
    fn from(enums: Enums) -> Self {
        EnumsRepr {
            domain: enums
                .domain
                .labels()
                .map(|labels| labels.iter().map(|l| l.to_string()).collect()),
        }
    }
}

/// A categorical column. Values are codes; [`EnumColumn::factor`] decodes
/// them against the domain recorded on the raw column.
#[derive(Clone, Debug)]
pub struct EnumColumn {
    inner: DataColumn<Enums>,
}

impl EnumColumn {
    pub fn factory(&self) -> &Enums {
        self.inner.factory()
    }

    /// The domain recorded on the raw column.
    pub fn domain(&self) -> Option<Arc<[Arc<str>]>> {
        self.vec().domain()
    }

    pub fn cardinality(&self) -> Option<usize> {
        self.vec().cardinality()
    }

    /// The label at `idx`, or `None` when the cell is missing.
    pub fn factor(&self, idx: usize) -> ColumnResult<Option<Arc<str>>> {
        // Decode the stored code itself; the typed `i32` view drops codes it
        // cannot represent.
        let Some(code) = self.vec().at_long(idx) else {
            return Ok(None);
        };
        let domain = self.domain().ok_or(ColumnError::MissingDomain)?;
        decode(&domain, code).map(Some)
    }

    /// Every label in row order.
    pub fn labels(&self) -> ColumnResult<Vec<Option<Arc<str>>>> {
        let domain = self.domain().ok_or(ColumnError::MissingDomain)?;
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.vec().chunks() {
            for i in 0..chunk.len() {
                out.push(chunk.at_long(i).map(|c| decode(&domain, c)).transpose()?);
            }
        }
        Ok(out)
    }

    /// Fail with [`ColumnError::DomainMismatch`] unless the recorded domain is
    /// exactly `expected`, in order.
    pub fn ensure_domain<S: AsRef<str>>(&self, expected: &[S]) -> ColumnResult<()> {
        let actual = self.domain().ok_or(ColumnError::MissingDomain)?;
        let same = actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(a, e)| a.as_ref() == e.as_ref());
        if same {
            return Ok(());
        }
        Err(ColumnError::DomainMismatch {
            expected: expected.iter().map(|e| e.as_ref().to_string()).collect(),
            actual: actual.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn into_vec(self) -> RawColumn {
        self.inner.into_vec()
    }
}

impl Column for EnumColumn {
    type Value = i32;

    fn vec(&self) -> &RawColumn {
        self.inner.vec()
    }
}

fn decode(domain: &[Arc<str>], code: i64) -> ColumnResult<Arc<str>> {
    usize::try_from(code)
        .ok()
        .and_then(|i| domain.get(i))
        .cloned()
        .ok_or(ColumnError::CodeOutOfDomain {
            code,
            cardinality: domain.len(),
        })
}
