//! Parsing contexts and the user facing options they are derived from.

use bitflags::bitflags;

bitflags! {
    /// Options a caller hands to the parser.
    #[derive(Default)]
    pub struct Options: u8 {
        /// Parse the source as if it were wrapped in a strict mode function.
        const STRICT = 1 << 0;
        /// Parse with the module goal, implies `STRICT`.
        const MODULE = 1 << 1;
        /// Keep the raw source text of literals.
        const RAW = 1 << 2;
        /// Attach `start`/`end` byte offsets to every node.
        const RANGES = 1 << 3;
        /// Attach line/column locations to every node.
        const LOC = 1 << 4;
        /// Enable the Annex B relaxations for sloppy mode function declarations.
        const WEB_COMPAT = 1 << 5;
        /// Allow `return` outside of functions.
        const GLOBAL_RETURN = 1 << 6;
    }
}

bitflags! {
    /// The grammar context a production is parsed under.
    ///
    /// A context is always passed by value, a production which enters a new scope
    /// derives a new context and hands it to its children, the caller's context is
    /// left untouched.
    pub struct Context: u32 {
        const STRICT = 1 << 0;
        const MODULE = 1 << 1;
        /// `return` is allowed.
        const IN_FUNCTION = 1 << 2;
        /// `yield` is an expression keyword.
        const IN_GENERATOR = 1 << 3;
        /// `await` is an expression keyword.
        const IN_ASYNC = 1 << 4;
        /// The `[In]` grammar parameter, cleared in `for` statement heads.
        const ALLOW_IN = 1 << 5;
        /// Unlabelled `continue` and `break` are allowed.
        const IN_ITERATION = 1 << 6;
        /// Unlabelled `break` is allowed.
        const IN_SWITCH = 1 << 7;
        /// `yield` and `await` expressions are errors inside of formal parameters.
        const IN_PARAMETERS = 1 << 8;
        /// `super.x` and `super[x]` are allowed.
        const SUPER_PROPERTY = 1 << 9;
        /// `super()` is allowed.
        const SUPER_CALL = 1 << 10;
        /// `new.target` is allowed.
        const NEW_TARGET = 1 << 11;
        /// Inside of a class field initializer, `arguments` is not allowed.
        const IN_CLASS_FIELD = 1 << 12;
        /// `await` is neither an identifier nor an expression, inside of class static
        /// blocks and the field initializers of async code.
        const AWAIT_RESERVED = 1 << 13;

        const OPTIONS_RAW = 1 << 16;
        const OPTIONS_RANGES = 1 << 17;
        const OPTIONS_LOC = 1 << 18;
        const OPTIONS_WEB_COMPAT = 1 << 19;
        const OPTIONS_GLOBAL_RETURN = 1 << 20;

        /// Every bit which is reset when entering a non arrow function body.
        const FUNCTION_RESET = Self::IN_GENERATOR.bits
            | Self::IN_ASYNC.bits
            | Self::IN_ITERATION.bits
            | Self::IN_SWITCH.bits
            | Self::IN_PARAMETERS.bits
            | Self::SUPER_PROPERTY.bits
            | Self::SUPER_CALL.bits
            | Self::IN_CLASS_FIELD.bits
            | Self::AWAIT_RESERVED.bits;
    }
}

impl Context {
    /// The context of the top level of a program parsed with `options`.
    pub fn from_options(options: Options) -> Self {
        let mut ctx = Context::ALLOW_IN;
        let module = options.contains(Options::MODULE);

        ctx.set(Context::STRICT, module || options.contains(Options::STRICT));
        ctx.set(Context::MODULE, module);
        // top level await
        ctx.set(Context::IN_ASYNC, module);
        ctx.set(Context::OPTIONS_RAW, options.contains(Options::RAW));
        ctx.set(Context::OPTIONS_RANGES, options.contains(Options::RANGES));
        ctx.set(Context::OPTIONS_LOC, options.contains(Options::LOC));
        ctx.set(Context::OPTIONS_WEB_COMPAT, options.contains(Options::WEB_COMPAT));
        ctx.set(
            Context::OPTIONS_GLOBAL_RETURN,
            options.contains(Options::GLOBAL_RETURN),
        );
        ctx
    }

    #[inline]
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }

    #[inline]
    pub fn is_module(self) -> bool {
        self.contains(Context::MODULE)
    }

    /// Whether Annex B sloppy mode relaxations apply here.
    #[inline]
    pub fn is_web_compat_sloppy(self) -> bool {
        self.contains(Context::OPTIONS_WEB_COMPAT) && !self.is_strict()
    }

    /// Add `flag` if `cond` holds, otherwise remove it.
    #[inline]
    pub fn toggle_if(mut self, flag: Context, cond: bool) -> Self {
        self.set(flag, cond);
        self
    }

    #[inline]
    pub fn with(self, flag: Context) -> Self {
        self | flag
    }

    #[inline]
    pub fn without(self, flag: Context) -> Self {
        self - flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_implies_strict() {
        let ctx = Context::from_options(Options::MODULE);
        assert!(ctx.is_strict());
        assert!(ctx.is_module());
        assert!(ctx.contains(Context::IN_ASYNC));
    }

    #[test]
    fn script_defaults() {
        let ctx = Context::from_options(Options::default());
        assert!(!ctx.is_strict());
        assert!(ctx.contains(Context::ALLOW_IN));
        assert!(!ctx.contains(Context::IN_FUNCTION));
    }

    #[test]
    fn web_compat_is_sloppy_only() {
        let ctx = Context::from_options(Options::WEB_COMPAT);
        assert!(ctx.is_web_compat_sloppy());
        assert!(!ctx.with(Context::STRICT).is_web_compat_sloppy());
    }

    #[test]
    fn function_reset_clears_scope_bits() {
        let ctx = Context::from_options(Options::MODULE)
            | Context::IN_GENERATOR
            | Context::IN_ITERATION
            | Context::IN_CLASS_FIELD;
        let body = ctx.without(Context::FUNCTION_RESET);
        assert!(body.is_strict());
        assert!(!body.contains(Context::IN_CLASS_FIELD));
        assert!(!body.contains(Context::IN_GENERATOR));
        assert!(!body.contains(Context::IN_ITERATION));
        assert!(!body.contains(Context::IN_ASYNC));
    }
}
