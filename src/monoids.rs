pub trait Magma {
    type Elem: Clone;

    fn combine(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem;
}

pub trait Associativity: Magma {}
pub trait Commutativity: Magma {}
pub trait Identity: Magma {
    /// Identity
    fn id(&self) -> Self::Elem;
}

pub trait Monoid: Magma + Associativity + Identity {}
impl<M: Magma + Associativity + Identity> Monoid for M {}

pub trait CommutativeMonoid: Monoid + Commutativity {}
impl<CM: Monoid + Commutativity> CommutativeMonoid for CM {}

#[derive(Clone, Copy, Debug)]
pub struct NumAdditiveMonoids<T>(std::marker::PhantomData<T>);

impl<T> Default for NumAdditiveMonoids<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumAdditiveMonoids<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Num + Clone> Magma for NumAdditiveMonoids<T> {
    type Elem = T;

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}
impl<T: num::Num + Clone> Identity for NumAdditiveMonoids<T> {
    #[inline]
    fn id(&self) -> T {
        T::zero()
    }
}
impl<T: num::Num + Clone> Associativity for NumAdditiveMonoids<T> {}
impl<T: num::Num + Clone> Commutativity for NumAdditiveMonoids<T> {}

/// Minimum with `+inf` as the identity.
#[derive(Clone, Copy, Debug)]
pub struct NumMinMonoids<T>(std::marker::PhantomData<T>);

impl<T> Default for NumMinMonoids<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumMinMonoids<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Float> Magma for NumMinMonoids<T> {
    type Elem = T;

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> T {
        lhs.min(rhs)
    }
}
impl<T: num::Float> Identity for NumMinMonoids<T> {
    #[inline]
    fn id(&self) -> T {
        T::infinity()
    }
}
impl<T: num::Float> Associativity for NumMinMonoids<T> {}
impl<T: num::Float> Commutativity for NumMinMonoids<T> {}

/// Maximum with `-inf` as the identity.
#[derive(Clone, Copy, Debug)]
pub struct NumMaxMonoids<T>(std::marker::PhantomData<T>);

impl<T> Default for NumMaxMonoids<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumMaxMonoids<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Float> Magma for NumMaxMonoids<T> {
    type Elem = T;

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> T {
        lhs.max(rhs)
    }
}
impl<T: num::Float> Identity for NumMaxMonoids<T> {
    #[inline]
    fn id(&self) -> T {
        T::neg_infinity()
    }
}
impl<T: num::Float> Associativity for NumMaxMonoids<T> {}
impl<T: num::Float> Commutativity for NumMaxMonoids<T> {}
