//! Declarative BSIM4 model parameter table.
//!
//! Every scalar is listed once with its SPICE name, default and meaning.
//! Binned parameters are listed once too; their `l`, `w` and `p`
//! variants are resolved by prefix in [`ModelParams::binned_mut`].

model_parameters! {
    scalars {
        mobmod: "mobmod" = 0.0 => "Mobility model selector",
        binunit: "binunit" = 1.0 => "Bin unit selector",
        paramchk: "paramchk" = 1.0 => "Model parameter checking selector",
        cvchargemod: "cvchargemod" = 0.0 => "Capacitance Charge model selector",
        capmod: "capmod" = 2.0 => "Capacitance model selector",
        diomod: "diomod" = 1.0 => "Diode IV model selector",
        rdsmod: "rdsmod" = 0.0 => "Bias-dependent S/D resistance model selector",
        trnqsmod: "trnqsmod" = 0.0 => "Transient NQS model selector",
        acnqsmod: "acnqsmod" = 0.0 => "AC NQS model selector",
        rbodymod: "rbodymod" = 0.0 => "Distributed body R model selector",
        rgatemod: "rgatemod" = 0.0 => "Gate R model selector",
        permod: "permod" = 1.0 => "Pd and Ps model selector",
        geomod: "geomod" = 0.0 => "Geometry dependent parasitics model selector",
        fnoimod: "fnoimod" = 1.0 => "Flicker noise model selector",
        tnoimod: "tnoimod" = 0.0 => "Thermal noise model selector",
        mtrlmod: "mtrlmod" = 0.0 => "Parameter for non-silicon substrate or metal gate selector",
        mtrlcompatmod: "mtrlcompatmod" = 0.0 => "New Material Mod backward compatibility selector",
        gidlmod: "gidlmod" = 0.0 => "Parameter for GIDL selector",
        igcmod: "igcmod" = 0.0 => "Gate-to-channel Ig model selector",
        igbmod: "igbmod" = 0.0 => "Gate-to-body Ig model selector",
        tempmod: "tempmod" = 0.0 => "Temperature model selector",
        version: "version" = 4.80 => "Parameter for model version",
        toxref: "toxref" = 30.0e-10 => "Target tox value",
        eot: "eot" = 15.0e-10 => "Equivalent gate oxide thickness in meters",
        vddeot: "vddeot" = 0.0 => "Voltage for extraction of Equivalent gate oxide thickness",
        tempeot: "tempeot" = 300.15 => "Temperature for extraction of EOT",
        leffeot: "leffeot" = 1.0 => "Effective length for extraction of EOT",
        weffeot: "weffeot" = 10.0 => "Effective width for extraction of EOT",
        ados: "ados" = 1.0 => "Charge centroid parameter",
        bdos: "bdos" = 1.0 => "Charge centroid parameter",
        toxe: "toxe" = 30.0e-10 => "Electrical gate oxide thickness in meters",
        toxp: "toxp" = 0.0 => "Physical gate oxide thickness in meters",
        toxm: "toxm" = 0.0 => "Gate oxide thickness at which parameters are extracted",
        dtox: "dtox" = 0.0 => "Defined as (toxe - toxp)",
        epsrox: "epsrox" = 3.9 => "Dielectric constant of the gate oxide relative to vacuum",
        phig: "phig" = 4.05 => "Work function of gate",
        epsrgate: "epsrgate" = 11.7 => "Dielectric constant of gate relative to vacuum",
        easub: "easub" = 4.05 => "Electron affinity of substrate",
        epsrsub: "epsrsub" = 11.7 => "Dielectric constant of substrate relative to vacuum",
        ni0sub: "ni0sub" = 1.45e10 => "Intrinsic carrier concentration of substrate at 300.15K",
        bg0sub: "bg0sub" = 1.16 => "Band-gap of substrate at T=0K",
        tbgasub: "tbgasub" = 7.02e-4 => "First parameter of band-gap change due to temperature",
        tbgbsub: "tbgbsub" = 1108.0 => "Second parameter of band-gap change due to temperature",
        voffl: "voffl" = 0.0 => "Length dependence parameter for Vth offset",
        voffcvl: "voffcvl" = 0.0 => "Length dependence parameter for Vth offset in CV",
        pditsl: "pditsl" = 0.0 => "Length dependence of drain-induced Vth shifts",
        rdswmin: "rdswmin" = 0.0 => "Source-drain resistance per width at high Vg",
        rdwmin: "rdwmin" = 0.0 => "Drain resistance per width at high Vg",
        rswmin: "rswmin" = 0.0 => "Source resistance per width at high Vg",
        lc: "lc" = 5.0e-9 => "Back scattering parameter",
        tnoia: "tnoia" = 1.5 => "Thermal noise parameter",
        tnoib: "tnoib" = 3.5 => "Thermal noise parameter",
        tnoic: "tnoic" = 0.0 => "Thermal noise parameter",
        rnoia: "rnoia" = 0.577 => "Thermal noise coefficient",
        rnoib: "rnoib" = 0.5164 => "Thermal noise coefficient",
        rnoic: "rnoic" = 0.395 => "Thermal noise coefficient",
        ntnoi: "ntnoi" = 1.0 => "Thermal noise parameter",
        lintnoi: "lintnoi" = 0.0 => "Lint offset for noise calculation",
        saref: "saref" = 1e-6 => "Reference distance between OD edge to poly of one side",
        sbref: "sbref" = 1e-6 => "Reference distance between OD edge to poly of the other side",
        wlod: "wlod" = 0.0 => "Width parameter for stress effect",
        ku0: "ku0" = 0.0 => "Mobility degradation/enhancement coefficient for LOD",
        kvsat: "kvsat" = 0.0 => "Saturation velocity degradation/enhancement parameter for LOD",
        kvth0: "kvth0" = 0.0 => "Threshold degradation/enhancement parameter for LOD",
        tku0: "tku0" = 0.0 => "Temperature coefficient of KU0",
        llodku0: "llodku0" = 0.0 => "Length parameter for u0 LOD effect",
        wlodku0: "wlodku0" = 0.0 => "Width parameter for u0 LOD effect",
        llodvth: "llodvth" = 0.0 => "Length parameter for vth LOD effect",
        wlodvth: "wlodvth" = 0.0 => "Width parameter for vth LOD effect",
        lku0: "lku0" = 0.0 => "Length dependence of ku0",
        wku0: "wku0" = 0.0 => "Width dependence of ku0",
        pku0: "pku0" = 0.0 => "Cross-term dependence of ku0",
        lkvth0: "lkvth0" = 0.0 => "Length dependence of kvth0",
        wkvth0: "wkvth0" = 0.0 => "Width dependence of kvth0",
        pkvth0: "pkvth0" = 0.0 => "Cross-term dependence of kvth0",
        stk2: "stk2" = 0.0 => "K2 shift factor related to stress effect on vth",
        lodk2: "lodk2" = 1.0 => "K2 shift modification factor for stress effect",
        steta0: "steta0" = 0.0 => "Eta0 shift factor related to stress effect on vth",
        lodeta0: "lodeta0" = 1.0 => "Eta0 shift modification factor for stress effect",
        web: "web" = 0.0 => "Coefficient for SCB",
        wec: "wec" = 0.0 => "Coefficient for SCC",
        scref: "scref" = 1.0e-6 => "Reference distance to calculate SCA, SCB and SCC",
        wpemod: "wpemod" = 0.0 => "Flag for WPE model (WPEMOD=1 to activate this model)",
        ijthdfwd: "ijthdfwd" = 0.0 => "Forward drain diode forward limiting current",
        ijthsfwd: "ijthsfwd" = 0.1 => "Forward source diode forward limiting current",
        ijthdrev: "ijthdrev" = 0.0 => "Reverse drain diode forward limiting current",
        ijthsrev: "ijthsrev" = 0.1 => "Reverse source diode forward limiting current",
        xjbvd: "xjbvd" = 0.0 => "Fitting parameter for drain diode breakdown current",
        xjbvs: "xjbvs" = 1.0 => "Fitting parameter for source diode breakdown current",
        bvd: "bvd" = 0.0 => "Drain diode breakdown voltage",
        bvs: "bvs" = 10.0 => "Source diode breakdown voltage",
        jtss: "jtss" = 0.0 => "Source bottom trap-assisted saturation current density",
        jtsd: "jtsd" = 0.0 => "Drain bottom trap-assisted saturation current density",
        jtssws: "jtssws" = 0.0 => "Source STI sidewall trap-assisted saturation current density",
        jtsswd: "jtsswd" = 0.0 => "Drain STI sidewall trap-assisted saturation current density",
        jtsswgs: "jtsswgs" = 0.0 => "Source gate-edge sidewall trap-assisted saturation current density",
        jtsswgd: "jtsswgd" = 0.0 => "Drain gate-edge sidewall trap-assisted saturation current density",
        jtweff: "jtweff" = 0.0 => "TAT current width dependance",
        njts: "njts" = 20.0 => "Non-ideality factor for bottom junction",
        njtssw: "njtssw" = 20.0 => "Non-ideality factor for STI sidewall junction",
        njtsswg: "njtsswg" = 20.0 => "Non-ideality factor for gate-edge sidewall junction",
        njtsd: "njtsd" = 0.0 => "Non-ideality factor for bottom junction drain side",
        njtsswd: "njtsswd" = 0.0 => "Non-ideality factor for STI sidewall junction drain side",
        njtsswgd: "njtsswgd" = 0.0 => "Non-ideality factor for gate-edge sidewall junction drain side",
        xtss: "xtss" = 0.02 => "Power dependence of JTSS on temperature",
        xtsd: "xtsd" = 0.0 => "Power dependence of JTSD on temperature",
        xtssws: "xtssws" = 0.02 => "Power dependence of JTSSWS on temperature",
        xtsswd: "xtsswd" = 0.0 => "Power dependence of JTSSWD on temperature",
        xtsswgs: "xtsswgs" = 0.02 => "Power dependence of JTSSWGS on temperature",
        xtsswgd: "xtsswgd" = 0.0 => "Power dependence of JTSSWGD on temperature",
        tnjts: "tnjts" = 0.0 => "Temperature coefficient for NJTS",
        tnjtssw: "tnjtssw" = 0.0 => "Temperature coefficient for NJTSSW",
        tnjtsswg: "tnjtsswg" = 0.0 => "Temperature coefficient for NJTSSWG",
        tnjtsd: "tnjtsd" = 0.0 => "Temperature coefficient for NJTSD",
        tnjtsswd: "tnjtsswd" = 0.0 => "Temperature coefficient for NJTSSWD",
        tnjtsswgd: "tnjtsswgd" = 0.0 => "Temperature coefficient for NJTSSWGD",
        vtss: "vtss" = 10.0 => "Source bottom trap-assisted voltage dependent parameter",
        vtsd: "vtsd" = 0.0 => "Drain bottom trap-assisted voltage dependent parameter",
        vtssws: "vtssws" = 10.0 => "Source STI sidewall trap-assisted voltage dependent parameter",
        vtsswd: "vtsswd" = 0.0 => "Drain STI sidewall trap-assisted voltage dependent parameter",
        vtsswgs: "vtsswgs" = 10.0 => "Source gate-edge sidewall trap-assisted voltage dependent parameter",
        vtsswgd: "vtsswgd" = 0.0 => "Drain gate-edge sidewall trap-assisted voltage dependent parameter",
        gbmin: "gbmin" = 1.0e-12 => "Minimum body conductance",
        rbdb: "rbdb" = 50.0 => "Resistance between bNode and dbNode",
        rbpb: "rbpb" = 50.0 => "Resistance between bNodePrime and bNode",
        rbsb: "rbsb" = 50.0 => "Resistance between bNode and sbNode",
        rbps: "rbps" = 50.0 => "Resistance between bNodePrime and sbNode",
        rbpd: "rbpd" = 50.0 => "Resistance between bNodePrime and bNode",
        rbps0: "rbps0" = 50.0 => "Body resistance RBPS scaling",
        rbpsl: "rbpsl" = 0.0 => "Body resistance RBPS L scaling",
        rbpsw: "rbpsw" = 0.0 => "Body resistance RBPS W scaling",
        rbpsnf: "rbpsnf" = 0.0 => "Body resistance RBPS NF scaling",
        rbpd0: "rbpd0" = 50.0 => "Body resistance RBPD scaling",
        rbpdl: "rbpdl" = 0.0 => "Body resistance RBPD L scaling",
        rbpdw: "rbpdw" = 0.0 => "Body resistance RBPD W scaling",
        rbpdnf: "rbpdnf" = 0.0 => "Body resistance RBPD NF scaling",
        rbpbx0: "rbpbx0" = 100.0 => "Body resistance RBPBX scaling",
        rbpbxl: "rbpbxl" = 0.0 => "Body resistance RBPBX L scaling",
        rbpbxw: "rbpbxw" = 0.0 => "Body resistance RBPBX W scaling",
        rbpbxnf: "rbpbxnf" = 0.0 => "Body resistance RBPBX NF scaling",
        rbpby0: "rbpby0" = 100.0 => "Body resistance RBPBY scaling",
        rbpbyl: "rbpbyl" = 0.0 => "Body resistance RBPBY L scaling",
        rbpbyw: "rbpbyw" = 0.0 => "Body resistance RBPBY W scaling",
        rbpbynf: "rbpbynf" = 0.0 => "Body resistance RBPBY NF scaling",
        rbsbx0: "rbsbx0" = 100.0 => "Body resistance RBSBX scaling",
        rbsby0: "rbsby0" = 100.0 => "Body resistance RBSBY scaling",
        rbdbx0: "rbdbx0" = 100.0 => "Body resistance RBDBX scaling",
        rbdby0: "rbdby0" = 100.0 => "Body resistance RBDBY scaling",
        rbsdbxl: "rbsdbxl" = 0.0 => "Body resistance RBSDBX L scaling",
        rbsdbxw: "rbsdbxw" = 0.0 => "Body resistance RBSDBX W scaling",
        rbsdbxnf: "rbsdbxnf" = 0.0 => "Body resistance RBSDBX NF scaling",
        rbsdbyl: "rbsdbyl" = 0.0 => "Body resistance RBSDBY L scaling",
        rbsdbyw: "rbsdbyw" = 0.0 => "Body resistance RBSDBY W scaling",
        rbsdbynf: "rbsdbynf" = 0.0 => "Body resistance RBSDBY NF scaling",
        dwc: "dwc" = 0.0 => "Delta W for C-V model",
        dlc: "dlc" = 0.0 => "Delta L for C-V model",
        xw: "xw" = 0.0 => "W offset for channel width due to mask/etch effect",
        xl: "xl" = 0.0 => "L offset for channel length due to mask/etch effect",
        dlcig: "dlcig" = 0.0 => "Delta L for Ig model",
        dlcigd: "dlcigd" = 0.0 => "Delta L for Ig model drain side",
        dwj: "dwj" = 0.0 => "Delta W for S/D junctions",
        dmcg: "dmcg" = 0.0 => "Distance of Mid-Contact to Gate edge",
        dmci: "dmci" = 0.0 => "Distance of Mid-Contact to Isolation",
        dmdg: "dmdg" = 0.0 => "Distance of Mid-Diffusion to Gate edge",
        dmcgt: "dmcgt" = 0.0 => "Distance of Mid-Contact to Gate edge in Test structures",
        xgw: "xgw" = 0.0 => "Distance from gate contact center to device edge",
        xgl: "xgl" = 0.0 => "Variation in Ldrawn",
        rshg: "rshg" = 0.1 => "Gate sheet resistance",
        ngcon: "ngcon" = 1.0 => "Number of gate contacts",
        tcj: "tcj" = 0.0 => "Temperature coefficient of cj",
        tpb: "tpb" = 0.0 => "Temperature coefficient of pb",
        tcjsw: "tcjsw" = 0.0 => "Temperature coefficient of cjsw",
        tpbsw: "tpbsw" = 0.0 => "Temperature coefficient of pbsw",
        tcjswg: "tcjswg" = 0.0 => "Temperature coefficient of cjswg",
        tpbswg: "tpbswg" = 0.0 => "Temperature coefficient of pbswg",
        tnom: "tnom" = 0.0 => "Parameter measurement temperature",
        cgso: "cgso" = 0.0 => "Gate-source overlap capacitance per width",
        cgdo: "cgdo" = 0.0 => "Gate-drain overlap capacitance per width",
        cgbo: "cgbo" = 0.0 => "Gate-bulk overlap capacitance per length",
        xpart: "xpart" = 0.0 => "Channel charge partitioning",
        rsh: "rsh" = 0.0 => "Source-drain sheet resistance",
        jss: "jss" = 1.0e-4 => "Bottom source junction reverse saturation current density",
        jsws: "jsws" = 0.0 => "Isolation edge sidewall source junction reverse saturation current density",
        jswgs: "jswgs" = 0.0 => "Gate edge source junction reverse saturation current density",
        pbs: "pbs" = 1.0 => "Source junction built-in potential",
        mjs: "mjs" = 0.5 => "Source bottom junction capacitance grading coefficient",
        pbsws: "pbsws" = 1.0 => "Source sidewall junction capacitance built in potential",
        mjsws: "mjsws" = 0.33 => "Source sidewall junction capacitance grading coefficient",
        cjs: "cjs" = 5.0e-4 => "Source bottom junction capacitance per unit area",
        cjsws: "cjsws" = 5.0e-10 => "Source sidewall junction capacitance per unit periphery",
        njs: "njs" = 1.0 => "Source junction emission coefficient",
        pbswgs: "pbswgs" = 0.0 => "Source (gate side) sidewall junction capacitance built in potential",
        mjswgs: "mjswgs" = 0.0 => "Source (gate side) sidewall junction capacitance grading coefficient",
        cjswgs: "cjswgs" = 0.0 => "Source (gate side) sidewall junction capacitance per unit width",
        xtis: "xtis" = 3.0 => "Source junction current temperature exponent",
        jsd: "jsd" = 0.0 => "Bottom drain junction reverse saturation current density",
        jswd: "jswd" = 0.0 => "Isolation edge sidewall drain junction reverse saturation current density",
        jswgd: "jswgd" = 0.0 => "Gate edge drain junction reverse saturation current density",
        pbd: "pbd" = 0.0 => "Drain junction built-in potential",
        mjd: "mjd" = 0.0 => "Drain bottom junction capacitance grading coefficient",
        pbswd: "pbswd" = 0.0 => "Drain sidewall junction capacitance built in potential",
        mjswd: "mjswd" = 0.0 => "Drain sidewall junction capacitance grading coefficient",
        cjd: "cjd" = 0.0 => "Drain bottom junction capacitance per unit area",
        cjswd: "cjswd" = 0.0 => "Drain sidewall junction capacitance per unit periphery",
        njd: "njd" = 0.0 => "Drain junction emission coefficient",
        pbswgd: "pbswgd" = 0.0 => "Drain (gate side) sidewall junction capacitance built in potential",
        mjswgd: "mjswgd" = 0.0 => "Drain (gate side) sidewall junction capacitance grading coefficient",
        cjswgd: "cjswgd" = 0.0 => "Drain (gate side) sidewall junction capacitance per unit width",
        xtid: "xtid" = 0.0 => "Drainjunction current temperature exponent",
        lint: "lint" = 0.0 => "Length reduction parameter",
        ll: "ll" = 0.0 => "Length reduction parameter",
        llc: "llc" = 0.0 => "Length reduction parameter for CV",
        lln: "lln" = 1.0 => "Length reduction parameter",
        lw: "lw" = 0.0 => "Length reduction parameter",
        lwc: "lwc" = 0.0 => "Length reduction parameter for CV",
        lwn: "lwn" = 1.0 => "Length reduction parameter",
        lwl: "lwl" = 0.0 => "Length reduction parameter",
        lwlc: "lwlc" = 0.0 => "Length reduction parameter for CV",
        lmin: "lmin" = 0.0 => "Minimum length for the model",
        lmax: "lmax" = 1.0 => "Maximum length for the model",
        wint: "wint" = 0.0 => "Width reduction parameter",
        wl: "wl" = 0.0 => "Width reduction parameter",
        wlc: "wlc" = 0.0 => "Width reduction parameter for CV",
        wln: "wln" = 1.0 => "Width reduction parameter",
        ww: "ww" = 0.0 => "Width reduction parameter",
        wwc: "wwc" = 0.0 => "Width reduction parameter for CV",
        wwn: "wwn" = 1.0 => "Width reduction parameter",
        wwl: "wwl" = 0.0 => "Width reduction parameter",
        wwlc: "wwlc" = 0.0 => "Width reduction parameter for CV",
        wmin: "wmin" = 0.0 => "Minimum width for the model",
        wmax: "wmax" = 1.0 => "Maximum width for the model",
        noia: "noia" = 0.0 => "Flicker noise parameter",
        noib: "noib" = 0.0 => "Flicker noise parameter",
        noic: "noic" = 8.75e9 => "Flicker noise parameter",
        em: "em" = 4.1e7 => "Flicker noise parameter",
        ef: "ef" = 1.0 => "Flicker noise frequency exponent",
        af: "af" = 1.0 => "Flicker noise exponent",
        kf: "kf" = 0.0 => "Flicker noise coefficient",
    }
    binned {
        cdsc: "cdsc" = 2.4e-4 => "Drain/Source and channel coupling capacitance",
        cdscb: "cdscb" = 0.0 => "Body-bias dependence of cdsc",
        cdscd: "cdscd" = 0.0 => "Drain-bias dependence of cdsc",
        cit: "cit" = 0.0 => "Interface state capacitance",
        nfactor: "nfactor" = 1.0 => "Subthreshold swing Coefficient",
        tnfactor: "tnfactor" = 0.0 => "Temperature parameter for nfactor",
        xj: "xj" = 0.15e-6 => "Junction depth in meters",
        vsat: "vsat" = 8.0e4 => "Saturation velocity at tnom",
        at: "at" = 3.3e4 => "Temperature coefficient of vsat",
        a0: "a0" = 1.0 => "Non-uniform depletion width effect coefficient.",
        ags: "ags" = 0.0 => "Gate bias coefficient of Abulk.",
        a1: "a1" = 0.0 => "Non-saturation effect coefficient",
        a2: "a2" = 1.0 => "Non-saturation effect coefficient",
        keta: "keta" = -0.047 => "Body-bias coefficient of non-uniform depletion width effect.",
        nsub: "nsub" = 6.0e16 => "Substrate doping concentration",
        ndep: "ndep" = 1.7e17 => "Channel doping concentration at the depletion edge",
        nsd: "nsd" = 1.0e20 => "S/D doping concentration",
        phin: "phin" = 0.0 => "Adjusting parameter for surface potential due to non-uniform vertical doping",
        ngate: "ngate" = 0.0 => "Poly-gate doping concentration",
        gamma1: "gamma1" = 0.0 => "Vth body coefficient",
        gamma2: "gamma2" = 0.0 => "Vth body coefficient",
        vbx: "vbx" = 0.0 => "Vth transition body Voltage",
        vbm: "vbm" = -3.0 => "Maximum body voltage",
        xt: "xt" = 1.55e-7 => "Doping depth",
        vfb: "vfb" = -1.0 => "Flat Band Voltage",
        k1: "k1" = 0.0 => "Bulk effect coefficient 1",
        kt1: "kt1" = -0.11 => "Temperature coefficient of Vth",
        kt1l: "kt1l" = 0.0 => "Temperature coefficient of Vth",
        k2: "k2" = 0.0 => "Bulk effect coefficient 2",
        kt2: "kt2" = 0.022 => "Body-coefficient of kt1",
        k3: "k3" = 80.0 => "Narrow width effect coefficient",
        k3b: "k3b" = 0.0 => "Body effect coefficient of k3",
        w0: "w0" = 2.5e-6 => "Narrow width effect parameter",
        lpe0: "lpe0" = 1.74e-7 => "Equivalent length of pocket region at zero bias",
        lpeb: "lpeb" = 0.0 => "Equivalent length of pocket region accounting for body bias",
        dvtp0: "dvtp0" = 0.0 => "First parameter for Vth shift due to pocket",
        dvtp1: "dvtp1" = 0.0 => "Second parameter for Vth shift due to pocket",
        dvtp2: "dvtp2" = 0.0 => "3rd parameter for Vth shift due to pocket",
        dvtp3: "dvtp3" = 0.0 => "4th parameter for Vth shift due to pocket",
        dvtp4: "dvtp4" = 0.0 => "5th parameter for Vth shift due to pocket",
        dvtp5: "dvtp5" = 0.0 => "6th parameter for Vth shift due to pocket",
        dvt0: "dvt0" = 2.2 => "Short channel effect coeff. 0",
        dvt1: "dvt1" = 0.53 => "Short channel effect coeff. 1",
        dvt2: "dvt2" = -0.032 => "Short channel effect coeff. 2",
        dvt0w: "dvt0w" = 0.0 => "Narrow Width coeff. 0",
        dvt1w: "dvt1w" = 5.3e6 => "Narrow Width effect coeff. 1",
        dvt2w: "dvt2w" = -0.032 => "Narrow Width effect coeff. 2",
        drout: "drout" = 0.56 => "DIBL coefficient of output resistance",
        dsub: "dsub" = 0.0 => "DIBL coefficient in the subthreshold region",
        vth0: "vth0" = 0.0 => "Threshold voltage",
        ua: "ua" = 0.0 => "Linear gate dependence of mobility",
        ua1: "ua1" = 1.0e-9 => "Temperature coefficient of ua",
        ub: "ub" = 1.0e-19 => "Quadratic gate dependence of mobility",
        ub1: "ub1" = -1.0e-18 => "Temperature coefficient of ub",
        uc: "uc" = 0.0 => "Body-bias dependence of mobility",
        uc1: "uc1" = 0.0 => "Temperature coefficient of uc",
        ud: "ud" = 0.0 => "Coulomb scattering factor of mobility",
        ud1: "ud1" = 0.0 => "Temperature coefficient of ud",
        up: "up" = 0.0 => "Channel length linear factor of mobility",
        lp: "lp" = 1.0e-8 => "Channel length exponential factor of mobility",
        eu: "eu" = 0.0 => "Mobility exponent",
        u0: "u0" = 0.0 => "Low-field mobility at Tnom",
        ute: "ute" = -1.5 => "Temperature coefficient of mobility",
        ucs: "ucs" = 0.0 => "Colombic scattering exponent",
        ucste: "ucste" = -4.775e-3 => "Temperature coefficient of colombic mobility",
        voff: "voff" = -0.08 => "Threshold voltage offset",
        tvoff: "tvoff" = 0.0 => "Temperature parameter for voff",
        minv: "minv" = 0.0 => "Fitting parameter for moderate inversion in Vgsteff",
        minvcv: "minvcv" = 0.0 => "Fitting parameter for moderate inversion in Vgsteffcv",
        fprout: "fprout" = 0.0 => "Rout degradation coefficient for pocket devices",
        pdits: "pdits" = 0.0 => "Coefficient for drain-induced Vth shifts",
        pditsd: "pditsd" = 0.0 => "Vds dependence of drain-induced Vth shifts",
        delta: "delta" = 0.01 => "Effective Vds parameter",
        rdsw: "rdsw" = 200.0 => "Source-drain resistance per width",
        rdw: "rdw" = 100.0 => "Drain resistance per width",
        rsw: "rsw" = 100.0 => "Source resistance per width",
        prwg: "prwg" = 1.0 => "Gate-bias effect on parasitic resistance",
        prwb: "prwb" = 0.0 => "Body-effect on parasitic resistance",
        prt: "prt" = 0.0 => "Temperature coefficient of parasitic resistance",
        eta0: "eta0" = 0.08 => "Subthreshold region DIBL coefficient",
        teta0: "teta0" = 0.0 => "Temperature parameter for eta0",
        tvoffcv: "tvoffcv" = 0.0 => "Temperature parameter for tvoffcv",
        etab: "etab" = -0.07 => "Subthreshold region DIBL coefficient",
        pclm: "pclm" = 1.3 => "Channel length modulation Coefficient",
        pdiblc1: "pdiblc1" = 0.39 => "Drain-induced barrier lowering coefficient",
        pdiblc2: "pdiblc2" = 0.0086 => "Drain-induced barrier lowering coefficient",
        pdiblcb: "pdiblcb" = 0.0 => "Body-effect on drain-induced barrier lowering",
        pscbe1: "pscbe1" = 4.24e8 => "Substrate current body-effect coefficient",
        pscbe2: "pscbe2" = 1.0e-5 => "Substrate current body-effect coefficient",
        pvag: "pvag" = 0.0 => "Gate dependence of output resistance parameter",
        wr: "wr" = 1.0 => "Width dependence of rds",
        dwg: "dwg" = 0.0 => "Width reduction parameter",
        dwb: "dwb" = 0.0 => "Width reduction parameter",
        b0: "b0" = 0.0 => "Abulk narrow width parameter",
        b1: "b1" = 0.0 => "Abulk narrow width parameter",
        alpha0: "alpha0" = 0.0 => "Substrate current model parameter",
        alpha1: "alpha1" = 0.0 => "Substrate current model parameter",
        beta0: "beta0" = 0.0 => "Substrate current model parameter",
        agidl: "agidl" = 0.0 => "Pre-exponential constant for GIDL",
        bgidl: "bgidl" = 2.3e9 => "Exponential constant for GIDL",
        cgidl: "cgidl" = 0.5 => "Parameter for body-bias dependence of GIDL",
        egidl: "egidl" = 0.8 => "Fitting parameter for Bandbending",
        rgidl: "rgidl" = 0.0 => "GIDL vg parameter",
        kgidl: "kgidl" = 0.0 => "GIDL vb parameter",
        fgidl: "fgidl" = 0.0 => "GIDL vb parameter",
        agisl: "agisl" = 0.0 => "Pre-exponential constant for GISL",
        bgisl: "bgisl" = 0.0 => "Exponential constant for GISL",
        cgisl: "cgisl" = 0.0 => "Parameter for body-bias dependence of GISL",
        egisl: "egisl" = 0.0 => "Fitting parameter for Bandbending",
        rgisl: "rgisl" = 0.0 => "GISL vg parameter",
        kgisl: "kgisl" = 0.0 => "GISL vb parameter",
        fgisl: "fgisl" = 0.0 => "GISL vb parameter",
        aigc: "aigc" = 0.0 => "Parameter for Igc",
        bigc: "bigc" = 0.0 => "Parameter for Igc",
        cigc: "cigc" = 0.0 => "Parameter for Igc",
        aigsd: "aigsd" = 0.0 => "Parameter for Igs,d",
        bigsd: "bigsd" = 0.0 => "Parameter for Igs,d",
        cigsd: "cigsd" = 0.0 => "Parameter for Igs,d",
        aigs: "aigs" = 0.0 => "Parameter for Igs",
        bigs: "bigs" = 0.0 => "Parameter for Igs",
        cigs: "cigs" = 0.0 => "Parameter for Igs",
        aigd: "aigd" = 0.0 => "Parameter for Igd",
        bigd: "bigd" = 0.0 => "Parameter for Igd",
        cigd: "cigd" = 0.0 => "Parameter for Igd",
        aigbacc: "aigbacc" = 1.36e-2 => "Parameter for Igb",
        bigbacc: "bigbacc" = 1.71e-3 => "Parameter for Igb",
        cigbacc: "cigbacc" = 0.075 => "Parameter for Igb",
        aigbinv: "aigbinv" = 1.11e-2 => "Parameter for Igb",
        bigbinv: "bigbinv" = 9.49e-4 => "Parameter for Igb",
        cigbinv: "cigbinv" = 0.006 => "Parameter for Igb",
        nigc: "nigc" = 1.0 => "Parameter for Igc slope",
        nigbacc: "nigbacc" = 1.0 => "Parameter for Igbacc slope",
        nigbinv: "nigbinv" = 3.0 => "Parameter for Igbinv slope",
        ntox: "ntox" = 1.0 => "Exponent for Tox ratio",
        eigbinv: "eigbinv" = 1.1 => "Parameter for the Si bandgap for Igbinv",
        pigcd: "pigcd" = 1.0 => "Parameter for Igc partition",
        poxedge: "poxedge" = 1.0 => "Factor for the gate edge Tox",
        xrcrg1: "xrcrg1" = 12.0 => "First fitting parameter the bias-dependent Rg",
        xrcrg2: "xrcrg2" = 1.0 => "Second fitting parameter the bias-dependent Rg",
        lambda: "lambda" = 0.0 => "Velocity overshoot parameter",
        vtl: "vtl" = 2.0e5 => "Thermal velocity",
        xn: "xn" = 3.0 => "Back scattering parameter",
        vfbsdoff: "vfbsdoff" = 0.0 => "S/D flatband voltage offset",
        tvfbsdoff: "tvfbsdoff" = 0.0 => "Temperature parameter for vfbsdoff",
        cgsl: "cgsl" = 0.0 => "New C-V model parameter",
        cgdl: "cgdl" = 0.0 => "New C-V model parameter",
        ckappas: "ckappas" = 0.6 => "S/G overlap C-V parameter",
        ckappad: "ckappad" = 0.0 => "D/G overlap C-V parameter",
        cf: "cf" = 0.0 => "Fringe capacitance parameter",
        clc: "clc" = 0.1e-6 => "Vdsat parameter for C-V model",
        cle: "cle" = 0.6 => "Vdsat parameter for C-V model",
        vfbcv: "vfbcv" = -1.0 => "Flat Band Voltage parameter for capmod=0 only",
        acde: "acde" = 1.0 => "Exponential coefficient for finite charge thickness",
        moin: "moin" = 15.0 => "Coefficient for gate-bias dependent surface potential",
        noff: "noff" = 1.0 => "C-V turn-on/off parameter",
        voffcv: "voffcv" = 0.0 => "C-V lateral-shift parameter",
        kvth0we: "kvth0we" = 0.0 => "Threshold shift factor for well proximity effect",
        k2we: "k2we" = 0.0 => "K2 shift factor for well proximity effect",
        ku0we: "ku0we" = 0.0 => "Mobility degradation factor for well proximity effect",
    }
}
